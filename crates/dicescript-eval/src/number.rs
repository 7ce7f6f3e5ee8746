//! Rendering numbers for trace and result lines.

/// Format a value the way players expect to read it: integers without a
/// fraction, `Infinity`/`-Infinity`/`NaN` spelled out, and no `-0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
