//! Model loading for isoview
//!
//! This crate turns model files into scene graphs. Each format has an
//! [`ObjectReader`] that parses raw bytes into a [`Group`]; the
//! [`LoaderRegistry`] picks a reader from the file extension and implements
//! the [`ObjectLoader`] capability used by the viewer.
//!
//! Supported formats:
//! - `.stl`: stereolithography, ASCII or binary, one group per facet
//! - `.mpp` / `.txt`: microfabrication path plans, one group per path segment
//!
//! Loading is all-or-nothing: a reader either returns a complete group or an
//! error, never a partially built scene.

pub mod error;
pub mod mpp;
pub mod registry;
mod scanner;
pub mod stl;

pub use error::*;
pub use mpp::MppReader;
pub use registry::LoaderRegistry;
pub use stl::StlReader;

use isoview_core::{Group, SceneNode};
use std::path::Path;

/// Capability to load a model file into a scene graph
pub trait ObjectLoader {
    /// Load the file at `path`
    fn load(&self, path: &Path) -> Result<SceneNode>;
}

/// Parser for one model format
pub trait ObjectReader: Send + Sync {
    /// Parse a complete file image into a group of nodes
    fn read(&self, bytes: &[u8]) -> Result<Group>;

    /// Get the format name this reader handles
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions this reader claims
    fn extensions(&self) -> &[&'static str];
}

/// Auto-detect format from the extension and load a model
pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneNode> {
    LoaderRegistry::default().load(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_three_facet_stl() {
        let mut file = Builder::new().suffix(".stl").tempfile().unwrap();
        writeln!(file, "solid three").unwrap();
        for i in 0..3 {
            let z = i as f64;
            writeln!(file, "facet normal 0 0 1\nouter loop").unwrap();
            writeln!(file, "vertex 0 0 {z}\nvertex 1 0 {z}\nvertex 0 1 {z}").unwrap();
            writeln!(file, "endloop\nendfacet").unwrap();
        }
        writeln!(file, "endsolid three").unwrap();

        let node = load(file.path()).unwrap();
        let group = node.as_group().unwrap();
        assert_eq!(group.len(), 3);
        for facet in group.iter() {
            let facet = facet.as_group().unwrap();
            assert_eq!(facet.len(), 3);
            assert!(facet.iter().all(|p| matches!(p, SceneNode::Point3(_))));
        }
    }

    #[test]
    fn test_load_malformed_is_error() {
        let mut file = Builder::new().suffix(".stl").tempfile().unwrap();
        writeln!(file, "solid bad\nfacet normal 0 0 1\nouter loop\nvertex 0 zero 0").unwrap();

        assert!(matches!(load(file.path()), Err(LoadError::Parse { .. })));
    }
}
