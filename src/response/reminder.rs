//! Smart reminders
//!
//! Picks reminder phrasing from the user's mood and streak, and the time slot
//! a habit works best in.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Reminder, Sentiment, UserContext};

/// Fallback slot when neither the habit table nor the caller names one
pub const DEFAULT_REMINDER_TIME: &str = "morning";

const CHALLENGE_PROBABILITY: f64 = 0.3;

/// Slots scanned in order; a habit listed twice resolves to the earlier slot
const OPTIMAL_TIMING: &[(&str, &[&str])] = &[
    ("morning", &["meditation", "exercise", "planning", "reading"]),
    ("afternoon", &["workout", "learning", "practice"]),
    ("evening", &["reflection", "planning", "relaxation"]),
    ("night", &["preparation", "journaling"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStyle {
    Gentle,
    Motivational,
    Progress,
    Challenge,
    Supportive,
}

impl ReminderStyle {
    pub fn select<R: Rng + ?Sized>(context: &UserContext, rng: &mut R) -> Self {
        if context.mood == Sentiment::Negative {
            ReminderStyle::Supportive
        } else if context.habit_streak > 5 {
            ReminderStyle::Progress
        } else if !context.recent_success {
            ReminderStyle::Motivational
        } else if rng.gen_bool(CHALLENGE_PROBABILITY) {
            ReminderStyle::Challenge
        } else {
            ReminderStyle::Gentle
        }
    }

    fn render(&self, habit: &str, streak: u32) -> String {
        match self {
            ReminderStyle::Gentle => format!("Just a friendly reminder: {}", habit),
            ReminderStyle::Motivational => format!("Time to {}! You've got this! 💪", habit),
            ReminderStyle::Progress => format!(
                "Don't break your {} streak! You're at {} days!",
                habit, streak
            ),
            ReminderStyle::Challenge => format!("Ready to tackle {}? Let's make today count!", habit),
            ReminderStyle::Supportive => format!(
                "Remember your {} goal. Small steps lead to big changes.",
                habit
            ),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SmartReminder;

impl SmartReminder {
    pub fn new() -> Self {
        Self
    }

    pub fn message<R: Rng + ?Sized>(&self, habit: &str, context: &UserContext, rng: &mut R) -> String {
        ReminderStyle::select(context, rng).render(habit, context.habit_streak)
    }

    /// Slot from the timing table, else the caller's preference, else morning
    pub fn optimal_time(&self, habit: &str, preferred_time: Option<&str>) -> String {
        let habit = habit.to_lowercase();

        OPTIMAL_TIMING
            .iter()
            .find(|(_, habits)| habits.contains(&habit.as_str()))
            .map(|(slot, _)| *slot)
            .or(preferred_time)
            .unwrap_or(DEFAULT_REMINDER_TIME)
            .to_string()
    }

    pub fn reminder<R: Rng + ?Sized>(&self, habit: &str, context: &UserContext, rng: &mut R) -> Reminder {
        Reminder {
            habit: habit.to_string(),
            message: self.message(habit, context, rng),
            optimal_time: self.optimal_time(habit, context.preferred_time.as_deref()),
        }
    }
}
