//! Shared utility functions.

/// Format a byte count as kilobytes with one decimal, e.g. `"12.5 KB"`.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
