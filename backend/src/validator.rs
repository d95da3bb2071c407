//! Raw value validation against a field's semantic type

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::FieldType;

/// String filter values are restricted to ASCII letters and digits
static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]*$").expect("valid alphanumeric pattern"));

/// Whether `raw` can be represented as a value of `field_type`.
pub fn is_representable(field_type: FieldType, raw: &str) -> bool {
    match field_type {
        FieldType::String => ALPHANUMERIC.is_match(raw),
        FieldType::Integer => raw.parse::<i64>().is_ok(),
        // f64 parsing accepts every f32 literal too, width is not distinguished.
        // NaN and infinities have no SQLite REAL representation.
        FieldType::Float => raw.parse::<f64>().is_ok_and(f64::is_finite),
        FieldType::Other => false,
    }
}
