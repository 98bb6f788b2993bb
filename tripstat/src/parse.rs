//! Field parsers tolerating the export's inconsistent cell formats.
//!
//! Numbers may use comma or period decimal separators and carry unit noise;
//! durations show up as `H:M:S`, `1h 30m`, `PT1H30M`, bare minutes, or not at
//! all (in which case the start/stop timestamps are the fallback).

use chrono::NaiveDateTime;

const TS_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a localized numeric cell. Strips everything outside `[0-9,.\-]` and
/// treats a comma as the decimal separator.
pub fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Parse an ISO-8601 timestamp, tolerating a trailing `Z`, a space separator,
/// fractional seconds, and minute precision.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim().trim_end_matches('Z');
    if trimmed.is_empty() {
        return None;
    }
    TS_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Parse a trip duration in minutes from the duration cell, falling back to
/// `stopped - started` (clamped to non-negative) when the cell is empty.
///
/// Formats are tried in order: colon-separated, `<n>h`/`<n>m` tokens,
/// `PT#H#M#S` shorthand, bare integer minutes. First match wins.
pub fn parse_duration_minutes(text: &str, started: &str, stopped: &str) -> Option<f64> {
    if text.is_empty() {
        let a = parse_timestamp(started)?;
        let b = parse_timestamp(stopped)?;
        let minutes = (b - a).num_milliseconds() as f64 / 60_000.0;
        return Some(minutes.max(0.0));
    }
    let t = text.trim().to_ascii_lowercase();
    colon_minutes(&t)
        .or_else(|| token_minutes(&t))
        .or_else(|| iso8601_minutes(&t))
        .or_else(|| bare_minutes(&t))
}

/// `H:M:S` or `M:S`. Unparsable or oddly-shaped colon text falls through to
/// the next format rather than failing the row.
fn colon_minutes(t: &str) -> Option<f64> {
    if !t.contains(':') {
        return None;
    }
    let parts: Vec<i64> = t
        .split(':')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [h, m, s] => Some(*h as f64 * 60.0 + *m as f64 + *s as f64 / 60.0),
        [m, s] => Some(*m as f64 + *s as f64 / 60.0),
        _ => None,
    }
}

/// `<n>h` and/or `<n>m` tokens, e.g. `1h 30m`, `45 m`, `90 minutes`.
fn token_minutes(t: &str) -> Option<f64> {
    let hours = unit_value(t, b'h');
    let minutes = unit_value(t, b'm');
    if hours.is_none() && minutes.is_none() {
        return None;
    }
    Some(hours.unwrap_or(0) as f64 * 60.0 + minutes.unwrap_or(0) as f64)
}

/// First digit run followed (after optional whitespace) by `unit`.
fn unit_value(t: &str, unit: u8) -> Option<u64> {
    let bytes = t.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let mut j = i;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == unit {
                return t[start..i].parse().ok();
            }
        } else {
            i += 1;
        }
    }
    None
}

/// ISO-8601 duration shorthand `PT#H#M#S`, every component optional. Matches
/// from the prefix only; trailing junk is ignored.
fn iso8601_minutes(t: &str) -> Option<f64> {
    let rest = t.strip_prefix("pt")?;
    let mut pos = 0usize;
    let h = iso_component(rest, &mut pos, b'h');
    let m = iso_component(rest, &mut pos, b'm');
    let s = iso_component(rest, &mut pos, b's');
    Some(h as f64 * 60.0 + m as f64 + s as f64 / 60.0)
}

fn iso_component(rest: &str, pos: &mut usize, unit: u8) -> u64 {
    let bytes = rest.as_bytes();
    let start = *pos;
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end > start && end < bytes.len() && bytes[end] == unit {
        if let Ok(value) = rest[start..end].parse() {
            *pos = end + 1;
            return value;
        }
    }
    0
}

fn bare_minutes(t: &str) -> Option<f64> {
    if !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) {
        t.parse().ok()
    } else {
        None
    }
}

/// Render a minute count as `D days, H h, M m` / `H hours, M minutes` /
/// `M minutes`, rounding to the nearest minute. `None` renders as an em dash.
pub fn format_minutes(minutes: Option<f64>) -> String {
    let Some(total) = minutes else {
        return "—".to_string();
    };
    let total = total.round() as i64;
    let (hours, mins) = (total / 60, total % 60);
    let (days, hours) = (hours / 24, hours % 24);
    if days > 0 {
        format!(
            "{} day{}, {} h, {} m",
            days,
            if days > 1 { "s" } else { "" },
            hours,
            mins
        )
    } else if hours > 0 {
        format!(
            "{} hour{}, {} minute{}",
            hours,
            if hours != 1 { "s" } else { "" },
            mins,
            if mins != 1 { "s" } else { "" }
        )
    } else {
        format!("{} minute{}", mins, if mins != 1 { "s" } else { "" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_accepts_both_decimal_separators() {
        assert_eq!(parse_number("12,5"), Some(12.5));
        assert_eq!(parse_number("12.5"), Some(12.5));
    }

    #[test]
    fn number_strips_unit_noise() {
        assert_eq!(parse_number(" 7.2 km"), Some(7.2));
        assert_eq!(parse_number("-3,5 l"), Some(-3.5));
    }

    #[test]
    fn number_rejects_empty_and_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("1,234.5"), None);
    }

    #[test]
    fn duration_colon_forms() {
        assert_eq!(parse_duration_minutes("1:30:00", "", ""), Some(90.0));
        assert_eq!(parse_duration_minutes("2:30", "", ""), Some(2.5));
    }

    #[test]
    fn duration_token_forms() {
        assert_eq!(parse_duration_minutes("45m", "", ""), Some(45.0));
        assert_eq!(parse_duration_minutes("1h 05m", "", ""), Some(65.0));
        assert_eq!(parse_duration_minutes("2h", "", ""), Some(120.0));
        assert_eq!(parse_duration_minutes("90 minutes", "", ""), Some(90.0));
    }

    #[test]
    fn duration_iso_forms() {
        assert_eq!(parse_duration_minutes("PT1H15M", "", ""), Some(75.0));
        assert_eq!(parse_duration_minutes("PT30S", "", ""), Some(0.5));
    }

    #[test]
    fn duration_bare_minutes() {
        assert_eq!(parse_duration_minutes("30", "", ""), Some(30.0));
    }

    #[test]
    fn duration_timestamp_fallback() {
        let got = parse_duration_minutes("", "2025-09-01T10:00:00", "2025-09-01T10:20:00");
        assert_eq!(got, Some(20.0));
    }

    #[test]
    fn duration_fallback_clamps_negative_spans() {
        let got = parse_duration_minutes("", "2025-09-01T10:20:00Z", "2025-09-01T10:00:00Z");
        assert_eq!(got, Some(0.0));
    }

    #[test]
    fn duration_unparsable_is_absent() {
        assert_eq!(parse_duration_minutes("soon", "", ""), None);
        assert_eq!(parse_duration_minutes("a:b", "", ""), None);
        assert_eq!(parse_duration_minutes("", "garbage", "2025-09-01T10:00:00"), None);
    }

    #[test]
    fn timestamp_variants() {
        assert!(parse_timestamp("2025-09-01T10:00:00").is_some());
        assert!(parse_timestamp("2025-09-01T10:00:00.500Z").is_some());
        assert!(parse_timestamp("2025-09-01 10:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn minutes_formatting() {
        assert_eq!(format_minutes(Some(90.0)), "1 hour, 30 minutes");
        assert_eq!(format_minutes(Some(1500.0)), "1 day, 1 h, 0 m");
        assert_eq!(format_minutes(Some(45.4)), "45 minutes");
        assert_eq!(format_minutes(Some(1.0)), "1 minute");
        assert_eq!(format_minutes(Some(59.6)), "1 hour, 0 minutes");
        assert_eq!(format_minutes(None), "—");
    }
}
