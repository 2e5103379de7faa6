//! Permissive parsers for positional string arguments.
//!
//! Monetary and boolean arguments never fail to parse: malformed input
//! degrades to `0.0` / `false`, matching what existing clients rely on.

/// Parses a decimal amount. Malformed or non-finite input yields `0.0`.
pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parses a boolean flag using the spellings `1 t T TRUE true True` and
/// `0 f F FALSE false False`. Anything else yields `false`.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// Parses an embedded JSON array of strings. Malformed input yields an
/// empty list.
pub fn parse_string_list(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_default()
}
