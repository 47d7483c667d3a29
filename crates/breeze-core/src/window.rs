// ── Query time window ──

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

/// Half-open `[start, end)` interval for historical data queries, in the
/// tenant's local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Midnight seven days before `now`'s date, up to `now`.
    pub fn last_week_from(now: NaiveDateTime) -> Self {
        let midnight = now.date().and_time(NaiveTime::MIN);
        Self {
            start: midnight - TimeDelta::days(7),
            end: now,
        }
    }

    /// The default window, anchored at the current local time.
    pub fn last_week() -> Self {
        Self::last_week_from(Local::now().naive_local())
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::last_week()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn last_week_starts_at_midnight_seven_days_back() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(15, 42, 7)
            .unwrap();
        let window = TimeWindow::last_week_from(now);
        assert_eq!(
            window.start,
            NaiveDate::from_ymd_opt(2024, 3, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(window.end, now);
    }
}
