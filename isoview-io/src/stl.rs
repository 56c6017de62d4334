//! Stereolithography (STL) reader
//!
//! Both the ASCII and the binary encodings are supported. Every facet becomes
//! one group holding its vertices as 3D points; the facet normal is ignored.

use crate::error::{LoadError, Result};
use crate::scanner::Scanner;
use crate::ObjectReader;
use isoview_core::{Group, Point3D};

const FORMAT: &str = "STL";
const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// STL reader
pub struct StlReader;

impl ObjectReader for StlReader {
    fn read(&self, bytes: &[u8]) -> Result<Group> {
        if is_binary(bytes) {
            read_binary(bytes)
        } else {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| LoadError::invalid(FORMAT, format!("not valid text: {e}")))?;
            read_ascii(text)
        }
    }

    fn format_name(&self) -> &'static str {
        FORMAT
    }

    fn extensions(&self) -> &[&'static str] {
        &["stl"]
    }
}

/// A binary file is exactly header + count + 50 bytes per facet. ASCII files
/// open with `solid` and carry `facet` keywords, which a binary header that
/// merely starts with `solid` does not.
fn is_binary(bytes: &[u8]) -> bool {
    if bytes.len() < HEADER_LEN + 4 {
        return false;
    }

    let count = u32::from_le_bytes([
        bytes[HEADER_LEN],
        bytes[HEADER_LEN + 1],
        bytes[HEADER_LEN + 2],
        bytes[HEADER_LEN + 3],
    ]) as usize;
    let sized = count
        .checked_mul(FACET_LEN)
        .and_then(|n| n.checked_add(HEADER_LEN + 4))
        .is_some_and(|expected| expected == bytes.len());

    sized && !looks_ascii(bytes)
}

fn looks_ascii(bytes: &[u8]) -> bool {
    let starts_solid = bytes
        .get(..5)
        .is_some_and(|head| head.eq_ignore_ascii_case(b"solid"));
    starts_solid
        && std::str::from_utf8(bytes).is_ok_and(|text| text.to_ascii_lowercase().contains("facet"))
}

fn read_ascii(text: &str) -> Result<Group> {
    let mut object = Group::new();
    let mut scanner = Scanner::new(text, FORMAT);

    // Skip the solid name and anything else before the first facet
    scanner.skip_past(|t| t.eq_ignore_ascii_case("facet"));

    loop {
        // Skip keywords up to the normal vector
        while scanner.has_next() && !scanner.has_next_number() {
            if scanner
                .next_token()
                .is_some_and(|t| t.eq_ignore_ascii_case("endsolid"))
            {
                return Ok(object);
            }
        }
        if !scanner.has_next() {
            break;
        }

        for axis in ["normal x", "normal y", "normal z"] {
            scanner.next_number(axis)?;
        }
        expect_keyword(&mut scanner, "outer")?;
        expect_keyword(&mut scanner, "loop")?;

        let mut polygon = Group::new();
        while scanner
            .peek()
            .is_some_and(|t| t.eq_ignore_ascii_case("vertex"))
        {
            scanner.next_token();
            let x = scanner.next_number("vertex x")?;
            let y = scanner.next_number("vertex y")?;
            let z = scanner.next_number("vertex z")?;
            polygon.add(Point3D::new(x, y, z));
        }
        expect_keyword(&mut scanner, "endloop")?;

        object.add(polygon);
    }

    Ok(object)
}

fn expect_keyword(scanner: &mut Scanner<'_>, keyword: &str) -> Result<()> {
    match scanner.next_token() {
        Some(token) if token.eq_ignore_ascii_case(keyword) => Ok(()),
        Some(token) => Err(LoadError::parse(
            FORMAT,
            format!("expected '{keyword}', found '{token}'"),
        )),
        None => Err(LoadError::parse(
            FORMAT,
            format!("unexpected end of file, expected '{keyword}'"),
        )),
    }
}

fn read_binary(bytes: &[u8]) -> Result<Group> {
    let mut object = Group::new();

    for facet in bytes[HEADER_LEN + 4..].chunks_exact(FACET_LEN) {
        // 12 bytes of normal, three 12-byte vertices, 2 bytes of attribute count
        let mut polygon = Group::new();
        for vertex in facet[12..48].chunks_exact(12) {
            polygon.add(Point3D::new(
                read_f32_le(&vertex[0..4]),
                read_f32_le(&vertex[4..8]),
                read_f32_le(&vertex[8..12]),
            ));
        }
        object.add(polygon);
    }

    Ok(object)
}

fn read_f32_le(slice: &[u8]) -> f64 {
    f32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]) as f64
}
