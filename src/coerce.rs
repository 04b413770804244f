//! Scalar coercion from raw cell text.
//!
//! None of these functions fail. Dirty cells degrade to a defined fallback (`0.0`, `false`,
//! `None`) so that every aggregation stays total over any loaded row store.

/// Status value marking a successful transaction.
pub const SUCCESS_STATUS: &str = "SUCCESS";
/// Status value marking a failed transaction.
pub const FAILED_STATUS: &str = "FAILED";

/// Parse `raw` as a float, returning `default` when absent, empty or unparseable.
pub fn to_number(raw: Option<&str>, default: f64) -> f64 {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s.parse::<f64>().unwrap_or(default),
        _ => default,
    }
}

/// `true` iff `status` is exactly [`SUCCESS_STATUS`].
pub fn is_success(status: Option<&str>) -> bool {
    status == Some(SUCCESS_STATUS)
}

/// `true` iff `status` is exactly [`FAILED_STATUS`].
pub fn is_failure(status: Option<&str>) -> bool {
    status == Some(FAILED_STATUS)
}

/// `true` iff `value` is one of the recognized truthy encodings: `1`, `True`, `true`.
///
/// Used for both fraud flags and weekend flags.
pub fn is_truthy_flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "True" | "true"))
}

/// Parse an hour-of-day cell. Surrounding whitespace is tolerated.
pub fn parse_hour(raw: Option<&str>) -> Option<u32> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<u32>().ok())
}

/// Round to two decimals against the exact stored value.
///
/// Formatting rounds the binary value itself, so `1.115` (stored as `1.11499…`) gives `1.11`
/// and exact ties such as `10.125` go to the even digit.
pub fn round2(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    format!("{v:.2}").parse::<f64>().unwrap_or(v)
}

/// `part / whole` as a percentage rounded to two decimals; `0.0` for an empty population.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}
