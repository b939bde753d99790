//! Reusable formatting utilities for report output

const KB_PER_MB: u64 = 1024;
const KB_PER_GB: u64 = 1024 * 1024;

/// Format a size given in KB as a human-readable string.
///
/// # Example output
/// - `512 KB`
/// - `1.5 MB`
/// - `2.0 GB`
pub fn format_size(size_kb: u64) -> String {
    if size_kb < KB_PER_MB {
        format!("{} KB", size_kb)
    } else if size_kb < KB_PER_GB {
        format!("{:.1} MB", size_kb as f64 / KB_PER_MB as f64)
    } else {
        format!("{:.1} GB", size_kb as f64 / KB_PER_GB as f64)
    }
}

/// Format a count with a singular/plural noun.
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
