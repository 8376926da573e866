//! User context builder
//!
//! Recomputes the small per-query summary (mood, trend, streak) from the
//! completion log. Nothing here is persisted.

use crate::models::{HabitCompletionRecord, Sentiment, UserContext};
use crate::streak::{StreakTracker, DEFAULT_PROGRESS_WINDOW};

const RECENT_SUCCESS_THRESHOLD: f64 = 0.5;

pub struct UserContextBuilder {
    window_size: usize,
}

impl Default for UserContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_WINDOW)
    }
}

impl UserContextBuilder {
    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    /// Build a context from records ordered oldest first.
    ///
    /// Mood comes from the override, else the newest record with a
    /// recognisable mood, else neutral.
    pub fn build(
        &self,
        records: &[HabitCompletionRecord],
        mood_override: Option<Sentiment>,
        preferred_time: Option<String>,
    ) -> UserContext {
        let mood = mood_override
            .or_else(|| {
                records
                    .iter()
                    .rev()
                    .find_map(|r| r.mood.as_deref().and_then(Sentiment::parse))
            })
            .unwrap_or_default();

        let success_rate = StreakTracker::success_rate(records, self.window_size);

        UserContext {
            mood,
            recent_progress: StreakTracker::recent_progress(records, self.window_size),
            habit_streak: StreakTracker::current_streak_length(records),
            recent_success: success_rate.map_or(true, |rate| rate > RECENT_SUCCESS_THRESHOLD),
            preferred_time,
            success_rate,
        }
    }
}
