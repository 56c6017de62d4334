//! Microfabrication path-plan (MPP) reader
//!
//! The data set follows a `...` marker line and is a flat list of
//! `x y z velocity intensity` records. A zero intensity starts a new path; every
//! pair of consecutive points on a path becomes one two-point group.

use crate::error::{LoadError, Result};
use crate::scanner::Scanner;
use crate::ObjectReader;
use isoview_core::{Group, Point3D};

const FORMAT: &str = "MPP";
const DATA_MARKER: &str = "...";

/// MPP path-plan reader, also used for `.txt` exports
pub struct MppReader;

impl ObjectReader for MppReader {
    fn read(&self, bytes: &[u8]) -> Result<Group> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| LoadError::invalid(FORMAT, format!("not valid text: {e}")))?;
        read_paths(text)
    }

    fn format_name(&self) -> &'static str {
        FORMAT
    }

    fn extensions(&self) -> &[&'static str] {
        &["mpp", "txt"]
    }
}

fn read_paths(text: &str) -> Result<Group> {
    let mut object = Group::new();
    let mut scanner = Scanner::new(text, FORMAT);

    if !scanner.skip_past(|t| t == DATA_MARKER) {
        tracing::warn!("MPP data marker '{}' not found; no paths loaded", DATA_MARKER);
        return Ok(object);
    }

    let mut path: Vec<Point3D> = Vec::with_capacity(2);
    while scanner.has_next() {
        let x = scanner.next_number("x")?;
        // A lone trailing value is not a record
        if !scanner.has_next() {
            break;
        }
        let y = scanner.next_number("y")?;
        let z = scanner.next_number("z")?;
        let _velocity = scanner.next_number("velocity")?;
        let intensity = scanner.next_number("intensity")?;

        // Laser off: the next point starts a new path
        if intensity == 0.0 {
            path.clear();
        }
        let point = Point3D::new(x, y, z);
        path.push(point.clone());

        if path.len() >= 2 {
            object.add(Group::from_nodes(path.drain(..).map(Into::into).collect()));
            path.push(point);
        }
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_follow_intensity() {
        let text = "header line
...
0 0 0 1 0
1 0 0 1 5
2 0 0 1 5
5 5 5 1 0
6 5 5 1 5
";
        let object = MppReader.read(text.as_bytes()).unwrap();
        assert_eq!(object.len(), 3);
        for segment in object.iter() {
            assert_eq!(segment.as_group().unwrap().len(), 2);
        }

        let last = object.get(2).unwrap();
        let last = last.as_group().unwrap();
        assert_eq!(last.get(0).unwrap(), Point3D::new(5.0, 5.0, 5.0).into());
        assert_eq!(last.get(1).unwrap(), Point3D::new(6.0, 5.0, 5.0).into());
    }

    #[test]
    fn test_consecutive_segments_share_endpoints() {
        let text = "...\n0 0 0 1 1\n1 0 0 1 1\n2 0 0 1 1\n";
        let object = MppReader.read(text.as_bytes()).unwrap();
        assert_eq!(object.len(), 2);

        let first = object.get(0).unwrap();
        let second = object.get(1).unwrap();
        assert_eq!(
            first.as_group().unwrap().get(1).unwrap(),
            second.as_group().unwrap().get(0).unwrap()
        );
    }

    #[test]
    fn test_missing_marker_is_empty() {
        let object = MppReader.read(b"0 0 0 1 1\n1 1 1 1 1\n").unwrap();
        assert!(object.is_empty());
    }

    #[test]
    fn test_trailing_value_is_ignored() {
        let object = MppReader.read(b"...\n0 0 0 1 1\n1 1 1 1 1\n7\n").unwrap();
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn test_malformed_record_is_error() {
        let result = MppReader.read(b"...\n0 0 zero 1 1\n");
        assert!(matches!(result, Err(LoadError::Parse { .. })));

        let result = MppReader.read(b"...\n0 0 0\n");
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }
}
