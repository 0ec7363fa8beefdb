#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
    use pmt::libs::calendar::{add_workdays, date_range, diff_days, diff_workdays, is_past_due_day, parse_date, WorkWeek};
    use pmt::libs::error::TrackerError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // 2024-01-01 is a Monday.

    #[test]
    fn test_is_past_due_day_same_day() {
        assert!(!is_past_due_day(d(2024, 1, 5), d(2024, 1, 5)));
        assert!(is_past_due_day(d(2024, 1, 6), d(2024, 1, 5)));
        assert!(!is_past_due_day(d(2024, 1, 4), d(2024, 1, 5)));
    }

    #[test]
    fn test_diff_days_signed() {
        assert_eq!(diff_days(d(2024, 1, 1), d(2024, 1, 8)), 7);
        assert_eq!(diff_days(d(2024, 1, 8), d(2024, 1, 1)), -7);
        assert_eq!(diff_days(d(2024, 2, 28), d(2024, 3, 1)), 2);
    }

    #[test]
    fn test_diff_workdays_inclusive() {
        assert_eq!(diff_workdays(d(2024, 1, 1), d(2024, 1, 5)), 5);
        assert_eq!(diff_workdays(d(2024, 1, 1), d(2024, 1, 7)), 5);
        assert_eq!(diff_workdays(d(2024, 1, 1), d(2024, 1, 8)), 6);
        assert_eq!(diff_workdays(d(2024, 1, 1), d(2024, 1, 1)), 1);
        assert_eq!(diff_workdays(d(2024, 1, 6), d(2024, 1, 7)), 0);
    }

    #[test]
    fn test_diff_workdays_reversed_range_is_zero() {
        assert_eq!(diff_workdays(d(2024, 1, 8), d(2024, 1, 1)), 0);
    }

    #[test]
    fn test_diff_workdays_matches_day_by_day_count() {
        let start = d(2024, 1, 3);
        for offset in 0..40 {
            let end = start + chrono::Days::new(offset);
            let expected = date_range(start, end).into_iter().filter(|day| WorkWeek::default().is_workday(*day)).count() as i64;
            assert_eq!(diff_workdays(start, end), expected, "range {} .. {}", start, end);
        }
    }

    #[test]
    fn test_add_workdays_skips_weekend() {
        assert_eq!(add_workdays(d(2024, 1, 5), 1), d(2024, 1, 8));
        assert_eq!(add_workdays(d(2024, 1, 3), 2), d(2024, 1, 5));
        assert_eq!(add_workdays(d(2024, 1, 6), 1), d(2024, 1, 8));
        assert_eq!(add_workdays(d(2024, 1, 1), 10), d(2024, 1, 15));
    }

    #[test]
    fn test_add_workdays_zero_is_identity() {
        assert_eq!(add_workdays(d(2024, 1, 6), 0), d(2024, 1, 6));
    }

    #[test]
    fn test_end_for_duration() {
        let week = WorkWeek::default();
        assert_eq!(week.end_for_duration(d(2024, 1, 4), 2), Some(d(2024, 1, 5)));
        assert_eq!(week.end_for_duration(d(2024, 1, 5), 2), Some(d(2024, 1, 8)));
        assert_eq!(week.end_for_duration(d(2024, 1, 6), 1), Some(d(2024, 1, 8)));
        assert_eq!(week.end_for_duration(d(2024, 1, 4), 0), None);
    }

    #[test]
    fn test_custom_work_week() {
        // Sunday to Thursday
        let week = WorkWeek::new(&[0, 1, 2, 3, 4]).unwrap();
        assert!(week.is_workday(d(2024, 1, 7)));
        assert!(!week.is_workday(d(2024, 1, 5)));
        assert_eq!(week.diff_workdays(d(2024, 1, 1), d(2024, 1, 7)), 5);
        assert_eq!(week.add_workdays(d(2024, 1, 4), 1), d(2024, 1, 7));
        assert_eq!(week.weekdays(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_work_week_rejects_empty_and_out_of_range() {
        assert!(matches!(WorkWeek::new(&[]), Err(TrackerError::Validation { entity: "WorkWeek", .. })));
        assert!(matches!(WorkWeek::new(&[1, 7]), Err(TrackerError::Validation { .. })));
    }

    #[test]
    fn test_date_range() {
        assert_eq!(date_range(d(2024, 1, 30), d(2024, 2, 2)), vec![d(2024, 1, 30), d(2024, 1, 31), d(2024, 2, 1), d(2024, 2, 2)]);
        assert!(date_range(d(2024, 1, 2), d(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-03-15").unwrap(), d(2024, 3, 15));
        assert_eq!(parse_date(" 2024-03-15 ").unwrap(), d(2024, 3, 15));
        assert_eq!(parse_date("2024-03-15T12:00:00Z").unwrap(), local_day("2024-03-15T12:00:00Z"));
        assert_eq!(parse_date("2024-03-15 08:00:00").unwrap(), d(2024, 3, 15));
        assert_eq!(parse_date("2024-03-15T08:00:00.123").unwrap(), d(2024, 3, 15));
    }

    fn local_day(text: &str) -> NaiveDate {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Local).date_naive()
    }

    #[test]
    fn test_parse_date_reads_timestamps_in_local_time() {
        // Local midnight of March 15 in UTC+8, stored as UTC.
        let east = "2024-03-14T16:00:00.000Z";
        assert_eq!(parse_date(east).unwrap(), local_day(east));

        let offset = "2024-03-15T00:00:00+08:00";
        let expected = FixedOffset::east_opt(8 * 3600).unwrap().with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap().with_timezone(&Local).date_naive();
        assert_eq!(parse_date(offset).unwrap(), expected);
    }

    #[test]
    fn test_parse_date_invalid() {
        for text in ["", "15/03/2024", "2024-02-30", "tomorrow"] {
            assert!(matches!(parse_date(text), Err(TrackerError::InvalidDate(_))), "{:?} should be rejected", text);
        }
    }
}
