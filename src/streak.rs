//! Streak tracking
//!
//! Derives streak state from a habit's completion log. Every operation is a
//! pure function over its inputs: no I/O, no logging, no partial mutation.

use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::error::CoachError;
use crate::models::{HabitCompletionRecord, Progress, Streak};
use crate::Result;

/// Default number of most recent records used for the progress trend
pub const DEFAULT_PROGRESS_WINDOW: usize = 5;

const IMPROVING_THRESHOLD: f64 = 0.7;
const DECLINING_THRESHOLD: f64 = 0.3;

impl Streak {
    /// First completion of a habit opens a one-day streak
    pub fn start(habit_id: Uuid, day: NaiveDate) -> Self {
        Self {
            habit_id,
            start_date: day,
            end_date: None,
            current_length: 1,
            longest_length: 1,
        }
    }

    /// Open, or closed no earlier than yesterday
    pub fn is_active(&self, today: NaiveDate) -> bool {
        match self.end_date {
            None => true,
            Some(end) => previous_day(today).map_or(true, |yesterday| end >= yesterday),
        }
    }
}

fn previous_day(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(1))
}

/// Streak state machine and completion-window statistics
pub struct StreakTracker;

impl StreakTracker {
    /// Apply one day's completion event to a streak.
    ///
    /// Returns a new streak; the input is never modified. Fails with
    /// `InvalidState` when `today` precedes the streak's start or end date.
    pub fn update(streak: &Streak, completed_today: bool, today: NaiveDate) -> Result<Streak> {
        if let Some(end) = streak.end_date {
            if today < end {
                return Err(CoachError::InvalidState(format!(
                    "update for {} precedes streak end date {}",
                    today, end
                )));
            }
        }
        if today < streak.start_date {
            return Err(CoachError::InvalidState(format!(
                "update for {} precedes streak start date {}",
                today, streak.start_date
            )));
        }

        let mut next = streak.clone();
        let active = streak.is_active(today);

        if completed_today {
            if active {
                if next.current_length == 0 {
                    // closed earlier today or yesterday, run restarts
                    next.start_date = today;
                }
                next.current_length += 1;
                next.longest_length = next.longest_length.max(next.current_length);
                next.end_date = None;
            } else {
                next.start_date = today;
                next.end_date = None;
                next.current_length = 1;
                next.longest_length = next.longest_length.max(1);
            }
        } else if active && next.end_date.is_none() {
            let yesterday = previous_day(today).ok_or_else(|| {
                CoachError::InvalidState(format!("no day precedes {}", today))
            })?;
            next.end_date = Some(yesterday);
            next.current_length = 0;
        }

        Ok(next)
    }

    /// Trend over the most recent `window_size` records (oldest first input).
    ///
    /// `improving` above 0.7, `declining` below 0.3, `stable` otherwise and
    /// for an empty window.
    pub fn recent_progress(records: &[HabitCompletionRecord], window_size: usize) -> Progress {
        match Self::success_rate(records, window_size) {
            Some(rate) if rate > IMPROVING_THRESHOLD => Progress::Improving,
            Some(rate) if rate < DECLINING_THRESHOLD => Progress::Declining,
            _ => Progress::Stable,
        }
    }

    /// Completed fraction of the most recent `window_size` records
    pub fn success_rate(records: &[HabitCompletionRecord], window_size: usize) -> Option<f64> {
        let window = &records[records.len().saturating_sub(window_size)..];
        if window.is_empty() {
            return None;
        }

        let completed = window.iter().filter(|r| r.completed).count();
        Some(completed as f64 / window.len() as f64)
    }

    /// Length of the contiguous run of completed records at the end of the log
    pub fn current_streak_length(records: &[HabitCompletionRecord]) -> u32 {
        records
            .iter()
            .rev()
            .take_while(|r| r.completed)
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn log(pattern: &[bool]) -> Vec<HabitCompletionRecord> {
        let habit_id = Uuid::new_v4();
        pattern
            .iter()
            .enumerate()
            .map(|(i, done)| HabitCompletionRecord::new(habit_id, *done, day(i as u32 + 1)))
            .collect()
    }

    fn open_streak(current: u32, longest: u32) -> Streak {
        Streak {
            habit_id: Uuid::new_v4(),
            start_date: day(1),
            end_date: None,
            current_length: current,
            longest_length: longest,
        }
    }

    #[test]
    fn test_extend_active_streak() {
        let streak = open_streak(4, 9);
        let next = StreakTracker::update(&streak, true, day(10)).unwrap();

        assert_eq!(next.current_length, 5);
        assert_eq!(next.longest_length, 9);
        assert_eq!(next.end_date, None);
        assert_eq!(next.start_date, day(1));
    }

    #[test]
    fn test_extend_raises_longest() {
        let streak = open_streak(9, 9);
        let next = StreakTracker::update(&streak, true, day(10)).unwrap();
        assert_eq!(next.current_length, 10);
        assert_eq!(next.longest_length, 10);
    }

    #[test]
    fn test_missed_day_closes_and_resets() {
        let streak = open_streak(4, 9);
        let closed = StreakTracker::update(&streak, false, day(10)).unwrap();

        assert_eq!(closed.end_date, Some(day(9)));
        assert_eq!(closed.current_length, 0);
        assert_eq!(closed.longest_length, 9);
    }

    #[test]
    fn test_closing_twice_is_noop() {
        let streak = open_streak(3, 3);
        let once = StreakTracker::update(&streak, false, day(10)).unwrap();
        let twice = StreakTracker::update(&once, false, day(10)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_completion_after_lapse_starts_fresh() {
        let mut streak = open_streak(0, 6);
        streak.end_date = Some(day(3));

        let next = StreakTracker::update(&streak, true, day(8)).unwrap();
        assert_eq!(next.start_date, day(8));
        assert_eq!(next.end_date, None);
        assert_eq!(next.current_length, 1);
        assert_eq!(next.longest_length, 6);
    }

    #[test]
    fn test_completion_right_after_close_reopens() {
        let streak = open_streak(5, 5);
        let closed = StreakTracker::update(&streak, false, day(10)).unwrap();
        let reopened = StreakTracker::update(&closed, true, day(11)).unwrap();

        // day 9 is before yesterday (10): a fresh run starts
        assert_eq!(reopened.current_length, 1);
        assert_eq!(reopened.start_date, day(11));
        assert_eq!(reopened.longest_length, 5);

        let same_day = StreakTracker::update(&closed, true, day(10)).unwrap();
        assert_eq!(same_day.current_length, 1);
        assert_eq!(same_day.start_date, day(10));
        assert_eq!(same_day.end_date, None);
    }

    #[test]
    fn test_out_of_order_update_fails() {
        let mut streak = open_streak(0, 2);
        streak.end_date = Some(day(9));

        let result = StreakTracker::update(&streak, true, day(5));
        assert!(matches!(result, Err(CoachError::InvalidState(_))));

        let fresh = Streak::start(Uuid::new_v4(), day(9));
        let result = StreakTracker::update(&fresh, false, day(2));
        assert!(matches!(result, Err(CoachError::InvalidState(_))));
    }

    #[test]
    fn test_longest_never_below_current() {
        let pattern = [true, true, false, true, true, true, false, false, true, true];
        let mut streak = Streak::start(Uuid::new_v4(), day(1));

        for (i, done) in pattern.iter().enumerate() {
            streak = StreakTracker::update(&streak, *done, day(i as u32 + 2)).unwrap();
            assert!(streak.longest_length >= streak.current_length);
        }
        assert_eq!(streak.longest_length, 3);
    }

    #[test]
    fn test_recent_progress_uses_latest_window() {
        let records = log(&[false, true, true, true, true, true]);
        assert_eq!(StreakTracker::recent_progress(&records, 5), Progress::Improving);
    }

    #[test]
    fn test_recent_progress_boundaries_are_stable() {
        // 7 of 10 → exactly 0.7
        let seventy = log(&[true, true, true, true, true, true, true, false, false, false]);
        assert_eq!(StreakTracker::recent_progress(&seventy, 10), Progress::Stable);

        // 3 of 10 → exactly 0.3
        let thirty = log(&[true, true, true, false, false, false, false, false, false, false]);
        assert_eq!(StreakTracker::recent_progress(&thirty, 10), Progress::Stable);

        let low = log(&[false, false, false, false, true]);
        assert_eq!(StreakTracker::recent_progress(&low, 5), Progress::Declining);
    }

    #[test]
    fn test_recent_progress_short_and_empty_windows() {
        assert_eq!(StreakTracker::recent_progress(&[], 5), Progress::Stable);
        assert_eq!(StreakTracker::success_rate(&[], 5), None);

        let short = log(&[true, true]);
        assert_eq!(StreakTracker::recent_progress(&short, 5), Progress::Improving);
    }

    #[test]
    fn test_current_streak_length_counts_trailing_run() {
        assert_eq!(StreakTracker::current_streak_length(&log(&[true, false, true, true])), 2);
        assert_eq!(StreakTracker::current_streak_length(&log(&[true, true, false])), 0);
        assert_eq!(StreakTracker::current_streak_length(&[]), 0);
    }
}
