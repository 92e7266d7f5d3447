//! Year-activity heatmap derivation.
//!
//! Every recorded test attempt contributes to the day (UTC) it was recorded
//! on: +2 for a passed attempt, +1 for a failed one, clamped to level 4.
//! Days without attempts stay at level 0. The window is the 365 consecutive
//! days ending on the supplied `today`, so the function stays pure and
//! testable.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use skillpath_core::TopicResult;

/// Length of the heatmap window in days.
pub const ACTIVITY_WINDOW_DAYS: i64 = 365;

/// One cell of the activity heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDay {
    /// Calendar day (UTC).
    pub date: NaiveDate,
    /// Intensity level, 0-4.
    pub level: u8,
}

/// Derives the 365-day activity heatmap ending on `today` from recorded
/// results. Results outside the window are ignored.
pub fn year_activity<'a, I>(today: NaiveDate, results: I) -> Vec<ActivityDay>
where
    I: IntoIterator<Item = &'a TopicResult>,
{
    let start = today - Duration::days(ACTIVITY_WINDOW_DAYS - 1);

    let mut levels: HashMap<NaiveDate, u8> = HashMap::new();
    for result in results {
        let Some(timestamp) = DateTime::from_timestamp_millis(result.updated_at_ms as i64) else {
            continue;
        };
        let date = timestamp.date_naive();
        if date < start || date > today {
            continue;
        }

        let increment = if result.passed { 2 } else { 1 };
        let level = levels.entry(date).or_insert(0);
        *level = (*level + increment).min(4);
    }

    (0..ACTIVITY_WINDOW_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset);
            ActivityDay {
                date,
                level: levels.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_on(date: NaiveDate, passed: bool) -> TopicResult {
        let ms = date.and_hms_opt(12, 0, 0).unwrap().and_utc().timestamp_millis() as u64;
        TopicResult::new(50.0, passed, ms)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn window_is_365_days_ending_today() {
        let days = year_activity(today(), []);
        assert_eq!(days.len(), 365);
        assert_eq!(days.last().unwrap().date, today());
        assert_eq!(days[0].date, today() - Duration::days(364));
        assert!(days.iter().all(|d| d.level == 0));
    }

    #[test]
    fn passed_counts_double() {
        let results = [result_on(today(), true), result_on(today(), false)];
        let days = year_activity(today(), results.iter());
        assert_eq!(days.last().unwrap().level, 3);
    }

    #[test]
    fn level_caps_at_four() {
        let results = vec![result_on(today(), true); 5];
        let days = year_activity(today(), results.iter());
        assert_eq!(days.last().unwrap().level, 4);
    }

    #[test]
    fn results_outside_window_are_ignored() {
        let results = [
            result_on(today() - Duration::days(400), true),
            result_on(today() + Duration::days(1), true),
        ];
        let days = year_activity(today(), results.iter());
        assert!(days.iter().all(|d| d.level == 0));
    }
}
