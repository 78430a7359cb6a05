//! Attribute normalization at the persistence boundary.
//!
//! Manual edits can leave text, NULL, or non-finite values in the numeric
//! columns. Everything that is not a finite number is read as `None`, so
//! callers never see a parse failure.

use rusqlite::types::ValueRef;
use rusqlite::Row;

use sakumon_core::constants::{MAX_LEVEL, MIN_LEVEL};
use sakumon_core::models::{normalize_attribute, parse_attribute};

/// Read a numeric attribute column leniently.
pub fn read_numeric(row: &Row<'_>, idx: usize) -> Option<f64> {
    match row.get_ref(idx).ok()? {
        ValueRef::Real(v) => normalize_attribute(v),
        ValueRef::Integer(v) => normalize_attribute(v as f64),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_attribute),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

/// Read a difficulty level column; anything outside 1..=5 is `None`.
pub fn read_level(row: &Row<'_>, idx: usize) -> Option<u8> {
    let value = read_numeric(row, idx)?;
    if value.fract() != 0.0 || value < MIN_LEVEL as f64 || value > MAX_LEVEL as f64 {
        return None;
    }
    Some(value as u8)
}
