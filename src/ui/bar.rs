/// Shown instead of a bar when there is nothing to scale.
pub const PLACEHOLDER: &str = "[ N/A ]";

const FILLED: &str = "#";
const EMPTY: &str = "─";

/// Render `value` as a bar of `length` cells scaled against `max`.
///
/// ```"not rust"
/// [######──────────────] 33.00
/// ```
///
/// Values above `max` are drawn (and printed) as `max`.
pub fn bar_graph(value: Option<f64>, max: f64, length: usize) -> String {
    let Some(value) = value else {
        return PLACEHOLDER.to_string();
    };
    if max == 0.0 {
        return PLACEHOLDER.to_string();
    }
    let value = value.min(max);
    let filled = ((value / max) * length as f64).clamp(0.0, length as f64) as usize;
    format!(
        "[{}{}] {:.2}",
        FILLED.repeat(filled),
        EMPTY.repeat(length - filled),
        value
    )
}

/// Bytes per second as KB/s, or MB/s from 1024 KB/s up.
pub fn format_speed(bytes_per_sec: u64) -> String {
    let kb = bytes_per_sec as f64 / 1024.0;
    if kb >= 1024.0 {
        format!("{:.2} MB/s", kb / 1024.0)
    } else {
        format!("{:.2} KB/s", kb)
    }
}
