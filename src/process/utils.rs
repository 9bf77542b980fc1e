/// Trim a raw CSV field, mapping blanks and any of `null_values` to `None`.
///
/// Sentinels are compared against both the raw and the trimmed value, so
/// `" "` and `" NA "` are absent under the default list.
pub fn clean_field(raw: &str, null_values: &[String]) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || null_values.iter().any(|n| n == raw || n == trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Round to `places` decimal digits, halves away from zero.
///
/// Scales the binary value before rounding, so the last digit can differ
/// from correctly rounded decimal output: `1.115` is stored just below the
/// tie, yet `1.115 * 100.0` is exactly `111.5`, giving `1.12` where
/// correct rounding gives `1.11`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
