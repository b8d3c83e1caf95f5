//! Week-boundary resolution
//!
//! Plans are keyed by the start date of an anchored week. The anchor is
//! fixed at Saturday regardless of locale, and the same resolver is used by
//! every caller: request handling and persistence must never encode this
//! calendar rule independently.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// First day of the plan week, independent of locale-default week starts.
pub const WEEK_ANCHOR: Weekday = Weekday::Sat;

/// Days covered by a single plan week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Largest supported week offset in either direction (100 years). Offsets
/// beyond this overflow the date arithmetic; callers take raw offsets from
/// the outside and must reject anything outside `±MAX_WEEK_OFFSET` before
/// resolving.
pub const MAX_WEEK_OFFSET: i64 = 5200;

/// A resolved plan week: the canonical start date plus its 6-day span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// Canonical key for the week (always a Saturday).
    pub start: NaiveDate,
    /// Last day of the week (start + 6 days).
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Resolve the window containing `today`, shifted by `week_offset` weeks.
    pub fn resolve(today: NaiveDate, week_offset: i64) -> Self {
        let start = resolve_week_start(today, week_offset);
        Self {
            start,
            end: start + Duration::days(DAYS_PER_WEEK - 1),
        }
    }

    /// Whether a date falls inside this window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Resolve the start date of the anchored week containing `today`, shifted
/// forward or backward by `week_offset` whole weeks.
///
/// Pure: two invocations with the same calendar day and offset always
/// return the same date. Total over offsets within `±MAX_WEEK_OFFSET`;
/// larger magnitudes overflow. `NaiveDate` carries no time-of-day, so the
/// result is inherently truncated to midnight.
pub fn resolve_week_start(today: NaiveDate, week_offset: i64) -> NaiveDate {
    // Days elapsed since the most recent Saturday (0 when today is Saturday).
    let days_since_anchor = (today.weekday().num_days_from_sunday() + 1) % 7;
    today - Duration::days(i64::from(days_since_anchor)) + Duration::weeks(week_offset)
}

/// Resolve the week start from an instant on the shared UTC clock.
///
/// UTC is the canonical timezone for "today" across the whole system. Callers
/// holding a clock go through this function; the resolved date is then passed
/// between components rather than recomputed.
pub fn resolve_week_start_utc(now: DateTime<Utc>, week_offset: i64) -> NaiveDate {
    resolve_week_start(now.date_naive(), week_offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sunday_resolves_to_previous_saturday() {
        // 2024-03-10 is a Sunday
        assert_eq!(resolve_week_start(date(2024, 3, 10), 0), date(2024, 3, 9));
    }

    #[test]
    fn positive_offset_moves_one_week_forward() {
        assert_eq!(resolve_week_start(date(2024, 3, 10), 1), date(2024, 3, 16));
    }

    #[test]
    fn negative_offset_moves_one_week_back() {
        assert_eq!(resolve_week_start(date(2024, 3, 10), -1), date(2024, 3, 2));
    }

    #[test]
    fn saturday_is_its_own_week_start() {
        assert_eq!(resolve_week_start(date(2024, 3, 9), 0), date(2024, 3, 9));
    }

    #[test]
    fn friday_resolves_to_previous_saturday() {
        // 2024-03-15 is a Friday, six days into the week of the 9th
        assert_eq!(resolve_week_start(date(2024, 3, 15), 0), date(2024, 3, 9));
    }

    #[test]
    fn supported_offset_extremes_resolve_to_the_anchor() {
        let forward = resolve_week_start(date(2024, 3, 10), MAX_WEEK_OFFSET);
        assert_eq!(forward.weekday(), WEEK_ANCHOR);
        let backward = resolve_week_start(date(2024, 3, 10), -MAX_WEEK_OFFSET);
        assert_eq!(backward.weekday(), WEEK_ANCHOR);
        assert_eq!(forward - backward, Duration::weeks(2 * MAX_WEEK_OFFSET));
    }

    #[test]
    fn utc_instant_uses_calendar_day() {
        let now = date(2024, 3, 10).and_hms_opt(23, 59, 59).unwrap().and_utc();
        assert_eq!(resolve_week_start_utc(now, 0), date(2024, 3, 9));
    }

    #[test]
    fn window_spans_six_days_past_start() {
        let window = WeekWindow::resolve(date(2024, 3, 10), 0);
        assert_eq!(window.start, date(2024, 3, 9));
        assert_eq!(window.end, date(2024, 3, 15));
        assert!(window.contains(date(2024, 3, 12)));
        assert!(!window.contains(date(2024, 3, 16)));
    }
}
