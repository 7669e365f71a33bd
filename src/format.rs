use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Human-scaled byte count: divide by 1024 until the value drops under 1024
/// or the units run out, then fall through to PB.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in BYTE_UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

/// Byte count in GB with a fixed number of decimals, e.g. `7.81GB`.
pub fn format_gb(bytes: u64, decimals: usize) -> String {
    format!("{:.*}GB", decimals, bytes as f64 / GIB)
}

pub fn format_used_total(used: u64, total: u64, decimals: usize) -> String {
    format!(
        "{} / {}",
        format_gb(used, decimals),
        format_gb(total, decimals)
    )
}
