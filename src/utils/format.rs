//! Formatting utilities for file sizes and paths.

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count for display (e.g., "512B", "1.50KB", "12.3MB").
///
/// Base 1024. Bytes are shown as an integer; other units get two decimals
/// below 10 and one decimal otherwise.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{}{}", bytes, SIZE_UNITS[0])
    } else if size < 10.0 {
        format!("{:.2}{}", size, SIZE_UNITS[unit])
    } else {
        format!("{:.1}{}", size, SIZE_UNITS[unit])
    }
}

/// Parse a size produced by [`format_size`] back into bytes.
///
/// Returns `None` for placeholders such as `"-"` or unknown units.
pub fn parse_size(text: &str) -> Option<u64> {
    let text = text.trim();
    let split = text.find(|c: char| c.is_ascii_alphabetic())?;
    let (number, unit) = text.split_at(split);
    let value: f64 = number.trim().parse().ok()?;
    let exponent = SIZE_UNITS
        .iter()
        .position(|u| u.eq_ignore_ascii_case(unit.trim()))?;
    Some((value * 1024f64.powi(exponent as i32)).round() as u64)
}

/// Collapse every run of two or more slashes into its first character.
///
/// `C:\\dir\\\file` becomes `C:\dir\file`; mixed runs keep the leading kind.
pub fn normalize_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut in_run = false;
    for c in path.chars() {
        let is_slash = c == '/' || c == '\\';
        if is_slash && in_run {
            continue;
        }
        in_run = is_slash;
        out.push(c);
    }
    out
}
