//! Time constants and calendar helpers.
//!
//! All helpers take the zone from the `now` they are given, so callers pick
//! between `Local` (production) and a fixed zone (tests).

use std::fmt;

use chrono::{DateTime, NaiveTime, TimeZone};

pub const HOUR_MS: i64 = 60 * 60 * 1000;

/// A session updated less than this long ago is active.
pub const ACTIVE_THRESHOLD_MS: i64 = 30 * 60 * 1000;

/// Number of one-hour buckets in the activity histogram.
pub const WINDOW_HOURS: usize = 24;

/// Length of the rolling activity window.
pub const WINDOW_MS: i64 = 24 * HOUR_MS;

/// Whether a session last updated at `updated_at_ms` counts as active at `now_ms`.
///
/// An unknown update time (`0`) is never active.
pub const fn is_active(updated_at_ms: i64, now_ms: i64) -> bool {
    updated_at_ms > 0 && now_ms - updated_at_ms < ACTIVE_THRESHOLD_MS
}

/// Midnight at the start of `now`'s calendar day, in `now`'s zone.
///
/// Ambiguous midnights (DST fall-back) resolve to the earlier instant. If
/// midnight doesn't exist (DST spring-forward) 1am is used instead.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let date = now.date_naive();

    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .or_else(|| {
            NaiveTime::from_hms_opt(1, 0, 0)
                .and_then(|one_am| tz.from_local_datetime(&date.and_time(one_am)).earliest())
        })
        .unwrap_or_else(|| now.clone())
}

/// Hour label `"HH:00"` for an instant.
pub fn format_hour<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format("%H:00").to_string()
}

/// Compact date label `"Mon D HH:MM"` for an epoch-millisecond instant in `tz`.
pub fn format_short_datetime<Tz>(ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tz.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%b %-d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_is_active_threshold() {
        let now = 10 * HOUR_MS;
        assert!(is_active(now, now));
        assert!(is_active(now - ACTIVE_THRESHOLD_MS + 1, now));
        assert!(!is_active(now - ACTIVE_THRESHOLD_MS, now));
        assert!(!is_active(0, now));
    }

    #[test]
    fn test_start_of_day_utc() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 14, 25, 7).unwrap();
        assert_eq!(
            start_of_day(&now),
            Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_start_of_day_uses_zone_of_now() {
        // 01:30 in UTC+5 is still the previous day in UTC
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 3, 10, 1, 30, 0).unwrap();
        let midnight = start_of_day(&now);

        assert_eq!(midnight, tz.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(
            midnight.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 3, 9, 19, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_start_of_day_skips_missing_midnight() {
        // Clocks jumped from 00:00 to 01:00 on this day
        let tz = chrono_tz::America::Sao_Paulo;
        let now = tz.with_ymd_and_hms(2018, 11, 4, 12, 0, 0).unwrap();
        let start = start_of_day(&now);

        assert_eq!(start, tz.with_ymd_and_hms(2018, 11, 4, 1, 0, 0).unwrap());
        assert_eq!(
            start.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2018, 11, 4, 3, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_start_of_day_takes_earlier_of_repeated_midnight() {
        // Clocks fell back from 01:00 to 00:00 on this day, so midnight happened twice
        let tz = chrono_tz::America::Havana;
        let now = tz.with_ymd_and_hms(2023, 11, 5, 12, 0, 0).unwrap();

        assert_eq!(
            start_of_day(&now).with_timezone(&Utc),
            Utc.with_ymd_and_hms(2023, 11, 5, 4, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_format_hour() {
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 7, 59, 59).unwrap();
        assert_eq!(format_hour(&at), "07:00");
    }

    #[test]
    fn test_format_short_datetime_has_no_day_padding() {
        let ms = Utc
            .with_ymd_and_hms(2026, 1, 2, 15, 4, 5)
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_short_datetime(ms, &Utc), "Jan 2 15:04");
    }
}
