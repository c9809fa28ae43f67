//! Cell cleanup shared by the decoder and the record model.

/// Canonical form of a raw CSV cell.
///
/// Absent cells become `""`; present cells lose leading and trailing
/// whitespace. Case and inner whitespace are preserved.
#[must_use]
pub fn normalize_field(raw: Option<&str>) -> String {
    raw.map_or_else(String::new, |value| value.trim().to_string())
}

/// Return `value`, or `fallback` when `value` is empty.
#[must_use]
pub fn or_default(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
