//! Shared formatting helpers for the quadrant views.
//!
//! All pure formatting functions (no ratatui styles, no layout) live here.

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

// ---------------------------------------------------------------------------
// Quantities
// ---------------------------------------------------------------------------

/// Format byte count as human-readable size.
///
/// Scales by 1024 up to TB: `"512 B"`, `"1.0 KB"`, `"1.5 GB"`.
pub fn format_bytes(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, BYTE_UNITS[0])
    } else {
        format!("{:.1} {}", size, BYTE_UNITS[unit])
    }
}

/// Format a kilobyte count as human-readable size.
pub fn format_kb(kb: u64) -> String {
    format_bytes(kb.saturating_mul(1024))
}

/// Format a rate given in megabits per second.
///
/// Below 1 Mbps the value is shown in Kbps, from 1024 Mbps on in Gbps.
pub fn format_rate(rate_mbps: f64) -> String {
    if rate_mbps < 1.0 {
        format!("{:.1} Kbps", rate_mbps * 1024.0)
    } else if rate_mbps < 1024.0 {
        format!("{:.1} Mbps", rate_mbps)
    } else {
        format!("{:.1} Gbps", rate_mbps / 1024.0)
    }
}

// ---------------------------------------------------------------------------
// Word wrap
// ---------------------------------------------------------------------------

/// Greedy word wrap into at most `max_lines` lines of `max_width` characters.
///
/// Explicit line breaks in `text` are kept, including empty lines. A long
/// line is broken at the last space that fits; a word longer than the width
/// is cut hard. Output stops once `max_lines` lines are produced.
pub fn wrap_text(text: &str, max_width: usize, max_lines: usize) -> Vec<String> {
    let mut out = Vec::new();
    if max_width == 0 || max_lines == 0 {
        return out;
    }

    for line in text.lines() {
        if out.len() >= max_lines {
            break;
        }
        let mut rest: Vec<char> = line.trim_end().chars().collect();
        if rest.is_empty() {
            out.push(String::new());
            continue;
        }

        while rest.len() > max_width && out.len() < max_lines {
            let indent = rest.iter().take_while(|c| **c == ' ').count();
            // Space at index `max_width` still lets the first `max_width` chars fit.
            let split = rest[..=max_width]
                .iter()
                .rposition(|c| *c == ' ')
                .filter(|pos| *pos > indent)
                .unwrap_or(max_width);

            out.push(rest[..split].iter().collect::<String>().trim_end().to_string());
            let skip = rest[split..].iter().take_while(|c| **c == ' ').count();
            rest.drain(..split + skip);
        }

        if !rest.is_empty() && out.len() < max_lines {
            out.push(rest.into_iter().collect());
        }
    }
    out
}
