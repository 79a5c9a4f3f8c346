//! Local time at a UTC offset
//!
//! Weather responses carry the location's offset from UTC in seconds; these
//! helpers turn that into wall-clock strings.

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};

/// Time-of-day format, e.g. "14:05:09"
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Date format, e.g. "Monday, 2024/01/15"
pub const DATE_FORMAT: &str = "%A, %Y/%m/%d";

/// A fixed offset, or UTC when the offset is out of range
fn offset(offset_secs: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_secs).unwrap_or_else(|| {
        tracing::debug!("UTC offset {}s out of range, using UTC", offset_secs);
        Utc.fix()
    })
}

/// Wall-clock time at an offset
pub fn time_at_offset(now: DateTime<Utc>, offset_secs: i32) -> String {
    now.with_timezone(&offset(offset_secs)).format(TIME_FORMAT).to_string()
}

/// Calendar date at an offset
pub fn date_at_offset(now: DateTime<Utc>, offset_secs: i32) -> String {
    now.with_timezone(&offset(offset_secs)).format(DATE_FORMAT).to_string()
}

/// Local time of a unix timestamp (sunrise, sunset) at an offset
///
/// Returns None for timestamps chrono cannot represent.
pub fn epoch_to_local_time(epoch_secs: i64, offset_secs: i32) -> Option<String> {
    offset(offset_secs)
        .timestamp_opt(epoch_secs, 0)
        .single()
        .map(|dt| dt.format(TIME_FORMAT).to_string())
}

/// Parse "UTC+09:00" / "UTC-03:30" into seconds east of UTC
pub fn parse_utc_offset(label: &str) -> Option<i32> {
    let rest = label.trim().strip_prefix("UTC")?;
    let mut chars = rest.chars();
    let sign = match chars.next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };

    let (hours, minutes) = chars.as_str().split_once(':')?;
    let two_digits = |field: &str| field.len() == 2 && field.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    Some(sign * (hours * 3600 + minutes * 60))
}

/// Format seconds east of UTC as "UTC+HH:MM"
pub fn format_utc_offset(offset_secs: i32) -> String {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

/// Offset label for the time actually shown at `offset_secs`
///
/// Out-of-range offsets render in UTC, so they are labelled "UTC+00:00".
pub fn offset_label(offset_secs: i32) -> String {
    format_utc_offset(offset(offset_secs).local_minus_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon_utc() -> DateTime<Utc> {
        // Monday 2024-01-15 12:00:00 UTC
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_time_at_offset() {
        assert_eq!(time_at_offset(noon_utc(), 0), "12:00:00");
        assert_eq!(time_at_offset(noon_utc(), 9 * 3600), "21:00:00");
        assert_eq!(time_at_offset(noon_utc(), -(3 * 3600 + 1800)), "08:30:00");
    }

    #[test]
    fn test_date_at_offset_crosses_midnight() {
        assert_eq!(date_at_offset(noon_utc(), 0), "Monday, 2024/01/15");
        assert_eq!(date_at_offset(noon_utc(), 13 * 3600), "Tuesday, 2024/01/16");
        assert_eq!(date_at_offset(noon_utc(), -13 * 3600), "Sunday, 2024/01/14");
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        assert_eq!(time_at_offset(noon_utc(), 200_000), "12:00:00");
        assert_eq!(offset_label(200_000), "UTC+00:00");
        assert_eq!(offset_label(-200_000), "UTC+00:00");
    }

    #[test]
    fn test_offset_label() {
        assert_eq!(offset_label(32_400), "UTC+09:00");
        assert_eq!(offset_label(-12_600), "UTC-03:30");
    }

    #[test]
    fn test_epoch_to_local_time() {
        // 2023-11-14 07:30:00 UTC
        let sunrise = 1_699_947_000;
        assert_eq!(epoch_to_local_time(sunrise, 0).as_deref(), Some("07:30:00"));
        assert_eq!(epoch_to_local_time(sunrise, 3600).as_deref(), Some("08:30:00"));
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("UTC+09:00"), Some(32_400));
        assert_eq!(parse_utc_offset("UTC-03:30"), Some(-12_600));
        assert_eq!(parse_utc_offset("UTC+00:00"), Some(0));
        assert_eq!(parse_utc_offset("GMT+09:00"), None);
        assert_eq!(parse_utc_offset("UTC09:00"), None);
        assert_eq!(parse_utc_offset("UTC+9:00"), None);
        assert_eq!(parse_utc_offset("UTC+09:75"), None);
        assert_eq!(parse_utc_offset("UTC++1:00"), None);
        assert_eq!(parse_utc_offset("UTC+-1:00"), None);
        assert_eq!(parse_utc_offset("UTC+01:+5"), None);
    }

    #[test]
    fn test_format_utc_offset() {
        assert_eq!(format_utc_offset(32_400), "UTC+09:00");
        assert_eq!(format_utc_offset(-12_600), "UTC-03:30");
        assert_eq!(format_utc_offset(0), "UTC+00:00");
        assert_eq!(parse_utc_offset(&format_utc_offset(19_800)), Some(19_800));
    }
}
