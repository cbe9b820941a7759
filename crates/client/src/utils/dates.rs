//! Calendar-day arithmetic for sales windows and event countdowns.

use chrono::NaiveDate;

/// Whole days from `today` until `date`; negative once `date` has passed.
#[must_use]
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Returns `true` if `date` is before `today`.
#[must_use]
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_until() {
        let today = day(2026, 2, 27);
        assert_eq!(days_until(day(2026, 3, 1), today), 2);
        assert_eq!(days_until(today, today), 0);
        assert_eq!(days_until(day(2026, 2, 20), today), -7);
    }

    #[test]
    fn test_is_past() {
        let today = day(2026, 2, 27);
        assert!(is_past(day(2026, 2, 26), today));
        assert!(!is_past(today, today));
    }
}
