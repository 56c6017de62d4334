//! Extension-keyed reader registry
//!
//! The registry maps lowercase file extensions to [`ObjectReader`]s and
//! implements [`ObjectLoader`] on top of them, so callers can load any
//! supported model without knowing which format it is in.

use crate::error::{LoadError, Result};
use crate::mpp::MppReader;
use crate::stl::StlReader;
use crate::{ObjectLoader, ObjectReader};
use isoview_core::{Drawable, SceneNode};
use std::collections::HashMap;
use std::path::Path;

/// Registry of model readers, selected by file extension
pub struct LoaderRegistry {
    readers: Vec<Box<dyn ObjectReader>>,
    by_extension: HashMap<String, usize>,
}

impl LoaderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            by_extension: HashMap::new(),
        }
    }

    /// Register a reader under every extension it claims.
    ///
    /// A later registration for an extension replaces the earlier one.
    pub fn register(&mut self, reader: Box<dyn ObjectReader>) {
        let index = self.readers.len();
        for ext in reader.extensions() {
            self.by_extension.insert(ext.to_lowercase(), index);
        }
        self.readers.push(reader);
    }

    /// Reader registered for `extension`, if any (case-insensitive)
    pub fn reader_for(&self, extension: &str) -> Option<&dyn ObjectReader> {
        self.by_extension
            .get(&extension.to_lowercase())
            .and_then(|&index| self.readers.get(index))
            .map(|reader| reader.as_ref())
    }

    /// Reader for the extension of `path`
    pub fn reader_for_path(&self, path: &Path) -> Result<&dyn ObjectReader> {
        let extension = path.extension().and_then(|s| s.to_str());
        extension
            .and_then(|ext| self.reader_for(ext))
            .ok_or_else(|| LoadError::UnsupportedFormat {
                extension: extension.map(str::to_string),
            })
    }

    /// All registered extensions, sorted
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for LoaderRegistry {
    /// Registry with the STL and MPP readers
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(StlReader));
        registry.register(Box::new(MppReader));
        registry
    }
}

impl ObjectLoader for LoaderRegistry {
    fn load(&self, path: &Path) -> Result<SceneNode> {
        let reader = self.reader_for_path(path)?;

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LoadError::Io(e),
        })?;

        let object = reader.read(&bytes)?;
        tracing::info!(
            path = %path.display(),
            format = reader.format_name(),
            groups = object.len(),
            points = object.point_count(),
            range = object.extents_max_range(),
            "model loaded"
        );

        Ok(SceneNode::Group(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, Builder};

    #[test]
    fn test_default_extensions() {
        let registry = LoaderRegistry::default();
        assert_eq!(registry.supported_extensions(), vec!["mpp", "stl", "txt"]);
        assert_eq!(registry.reader_for("STL").unwrap().format_name(), "STL");
        assert_eq!(registry.reader_for("txt").unwrap().format_name(), "MPP");
        assert!(registry.reader_for("obj").is_none());
    }

    #[test]
    fn test_unknown_extension() {
        let registry = LoaderRegistry::default();
        let err = registry.load(Path::new("model.obj")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnsupportedFormat { extension: Some(ref e) } if e == "obj"
        ));

        let err = registry.load(Path::new("model")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { extension: None }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = LoaderRegistry::default()
            .load(&dir.path().join("absent.stl"))
            .unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_uppercase_extension_loads() {
        let mut file = Builder::new().suffix(".MPP").tempfile().unwrap();
        writeln!(file, "...\n0 0 0 1 1\n1 1 1 1 1").unwrap();

        let node = LoaderRegistry::default().load(file.path()).unwrap();
        assert_eq!(node.as_group().unwrap().len(), 1);
    }

    #[test]
    fn test_custom_reader_overrides() {
        struct Empty;
        impl ObjectReader for Empty {
            fn read(&self, _bytes: &[u8]) -> Result<isoview_core::Group> {
                Ok(isoview_core::Group::new())
            }
            fn format_name(&self) -> &'static str {
                "EMPTY"
            }
            fn extensions(&self) -> &[&'static str] {
                &["stl"]
            }
        }

        let mut registry = LoaderRegistry::default();
        registry.register(Box::new(Empty));
        assert_eq!(registry.reader_for("stl").unwrap().format_name(), "EMPTY");
    }
}
