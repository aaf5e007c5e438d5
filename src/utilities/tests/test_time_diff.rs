#[cfg(test)]
mod tests {
    use crate::utilities::time_diff;
    use chrono::{Duration, TimeZone, Utc};

    fn diff(seconds: i64) -> String {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        time_diff(&start, &(start + Duration::seconds(seconds)))
    }

    #[test]
    fn test_under_a_day_is_clock_only() {
        assert_eq!(diff(0), "00:00:00");
        assert_eq!(diff(59), "00:00:59");
        assert_eq!(diff(3600 + 60 + 1), "01:01:01");
    }

    #[test]
    fn test_single_units_are_not_pluralised() {
        assert_eq!(diff(24 * 3600), "1 day 00:00:00");
        assert_eq!(diff(7 * 24 * 3600), "1 week 00:00:00");
    }

    #[test]
    fn test_all_units() {
        let day = 24 * 3600;
        let seconds = 2 * 365 * day + 30 * day + 2 * 7 * day + 3 * day + 10 * 3600 + 23 * 60 + 33;
        assert_eq!(diff(seconds), "2 years 1 month 2 weeks 3 days 10:23:33");
    }

    // edge case: zero units in the middle are skipped
    #[test]
    fn test_skips_zero_units() {
        let day = 24 * 3600;
        assert_eq!(diff(365 * day + 5), "1 year 00:00:05");
    }

    #[test]
    fn test_negative_difference_clamps_to_zero() {
        assert_eq!(diff(-90), "00:00:00");
    }

    #[test]
    fn test_fractional_seconds_are_floored() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = start + Duration::milliseconds(1999);
        assert_eq!(time_diff(&start, &later), "00:00:01");
    }
}
