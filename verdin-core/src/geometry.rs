//! Geometry extraction and topological predicates.
//!
//! Asserted and member values arrive as literals that may wrap the actual
//! well-known-text in extraneous text (CRS IRIs, datatype remnants). The
//! first WKT shape token is located by pattern search and its extent taken
//! to the balancing close paren, then parsed with `wkt` into a
//! `geo-types` geometry.

use crate::error::{Result, ValidationError};
use geo::Contains;
use geo_types::Geometry;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

fn shape_token() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(
            "MULTIPOLYGON|MULTILINESTRING|MULTIPOINT|GEOMETRYCOLLECTION|POLYGON|LINESTRING|POINT",
        )
        .unwrap()
    })
}

/// Extract the first WKT shape found in `input`, stripping any wrapping
/// text. Returns `None` when no shape token is present.
pub fn extract_wkt(input: &str) -> Option<&str> {
    let m = shape_token().find(input)?;
    let rest = &input[m.end()..];
    let open_offset = rest.find('(')?;
    // Nothing but whitespace may sit between the token and its opening paren.
    if !rest[..open_offset].trim().is_empty() {
        return None;
    }

    let mut depth = 0usize;
    for (i, &b) in rest.as_bytes().iter().enumerate().skip(open_offset) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&input[m.start()..m.end() + i + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse the first WKT shape in a literal into a geometry.
pub fn parse_geometry(input: &str) -> Result<Geometry<f64>> {
    let wkt_str = extract_wkt(input)
        .ok_or_else(|| ValidationError::InvalidWkt(format!("no WKT shape found in [{input}]")))?;
    let parsed: wkt::Wkt<f64> = wkt::Wkt::from_str(wkt_str)
        .map_err(|e| ValidationError::InvalidWkt(format!("{e:?}")))?;
    parsed
        .try_into()
        .map_err(|e: wkt::conversion::Error| ValidationError::InvalidWkt(format!("{e:?}")))
}

/// Topological containment of `inner` within `outer`.
pub fn geometry_contains(outer: &Geometry<f64>, inner: &Geometry<f64>) -> bool {
    outer.contains(inner)
}
