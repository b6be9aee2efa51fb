//! Calendar date helpers.
//!
//! Stored dates are date-only strings. They are bucketed by their year, month
//! and day components alone, so a stored `"2024-03-10"` lands on March 10 no
//! matter which UTC offset the server or caller runs in.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Fixed-width storage format for calendar documents.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";

/// Reduce a date or timestamp string to its calendar day.
///
/// Timestamps keep the wall-clock date they were written with: the offset is
/// never applied, so `"2024-03-10T23:30:00-05:00"` is still March 10.
pub fn normalize(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, STORAGE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local().date());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts.date());
        }
    }
    None
}

pub fn format_storage(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

/// First day of the week containing `date`. `None` when that day falls
/// before the first representable date.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> Option<NaiveDate> {
    let offset = (7 + date.weekday().num_days_from_monday() - first_day.num_days_from_monday()) % 7;
    date.checked_sub_signed(Duration::days(offset as i64))
}

/// The seven days starting at `start`, or `None` past the last representable date.
pub fn week_days(start: NaiveDate) -> Option<Vec<NaiveDate>> {
    (0..7).map(|i| start.checked_add_signed(Duration::days(i))).collect()
}

/// Move `pivot` by whole weeks and snap to the week start.
pub fn shift_weeks(pivot: NaiveDate, weeks: i64, first_day: Weekday) -> Option<NaiveDate> {
    week_start(pivot.checked_add_signed(Duration::weeks(weeks))?, first_day)
}

/// Header label such as "March 10 - March 16, 2024".
pub fn week_label(start: NaiveDate) -> Option<String> {
    let end = start.checked_add_signed(Duration::days(6))?;
    Some(format!("{} - {}", start.format("%B %-d"), end.format("%B %-d, %Y")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_only_strings_keep_their_day() {
        assert_eq!(normalize("2024-03-10"), Some(date(2024, 3, 10)));
        assert_eq!(normalize(" 2024-03-10 "), Some(date(2024, 3, 10)));
    }

    #[test]
    fn timestamps_ignore_their_offset() {
        assert_eq!(normalize("2024-03-10T23:30:00-05:00"), Some(date(2024, 3, 10)));
        assert_eq!(normalize("2024-03-10T00:15:00+09:00"), Some(date(2024, 3, 10)));
        assert_eq!(normalize("2024-03-10T00:00:00Z"), Some(date(2024, 3, 10)));
        assert_eq!(normalize("2024-03-10T18:45:12.500"), Some(date(2024, 3, 10)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("next tuesday"), None);
        assert_eq!(normalize("2024-02-30"), None);
    }

    #[test]
    fn week_starts_on_configured_day() {
        // 2024-03-13 is a Wednesday.
        assert_eq!(week_start(date(2024, 3, 13), Weekday::Sun), Some(date(2024, 3, 10)));
        assert_eq!(week_start(date(2024, 3, 13), Weekday::Mon), Some(date(2024, 3, 11)));
        assert_eq!(week_start(date(2024, 3, 10), Weekday::Sun), Some(date(2024, 3, 10)));
        assert_eq!(week_start(date(2024, 3, 10), Weekday::Mon), Some(date(2024, 3, 4)));
    }

    #[test]
    fn shifting_weeks_snaps_to_week_start() {
        assert_eq!(shift_weeks(date(2024, 3, 13), 1, Weekday::Sun), Some(date(2024, 3, 17)));
        assert_eq!(shift_weeks(date(2024, 3, 13), -1, Weekday::Sun), Some(date(2024, 3, 3)));
        assert_eq!(shift_weeks(date(2024, 12, 31), 1, Weekday::Mon), Some(date(2025, 1, 6)));
    }

    #[test]
    fn week_has_seven_consecutive_days_and_label() {
        let days = week_days(date(2024, 3, 10)).unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[6], date(2024, 3, 16));
        assert_eq!(week_label(date(2024, 3, 10)).as_deref(), Some("March 10 - March 16, 2024"));
        assert_eq!(format_storage(date(2024, 1, 5)), "2024-01-05");
    }

    #[test]
    fn weeks_at_the_calendar_edges_are_none() {
        assert_eq!(week_days(NaiveDate::MAX), None);
        assert_eq!(week_label(NaiveDate::MAX), None);
        assert_eq!(shift_weeks(NaiveDate::MAX, 1, Weekday::Sun), None);
        assert_eq!(shift_weeks(NaiveDate::MIN, -1, Weekday::Sun), None);

        let day_after_min = NaiveDate::MIN.weekday().succ();
        assert_eq!(week_start(NaiveDate::MIN, day_after_min), None);
        assert_eq!(week_start(NaiveDate::MIN, NaiveDate::MIN.weekday()), Some(NaiveDate::MIN));
    }
}
