//! Core data models for the habit coach

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

/// Mood of a user, also used as the sentiment label of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Lenient parse of free-form mood labels recorded alongside completions
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "positive" | "good" | "great" | "happy" => Some(Sentiment::Positive),
            "negative" | "bad" | "sad" | "stressed" => Some(Sentiment::Negative),
            "neutral" | "okay" | "ok" | "fine" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

/// Trend of the recent completion window
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Progress {
    Improving,
    #[default]
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Custom,
}

//
// ================= Users & Habits =================
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    pub preferred_time: Option<String>,
    pub coaching_style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub frequency: Frequency,
    pub reminder_time: String,
    pub created_at: DateTime<Utc>,
}

//
// ================= Completion Log =================
//

/// One entry of the append-only completion log. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HabitCompletionRecord {
    pub habit_id: Uuid,
    pub completed: bool,
    pub mood: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Free label such as "morning"; grouped as "unknown" when absent
    #[serde(default)]
    pub time_of_day: Option<String>,
    pub timestamp: NaiveDate,
}

impl HabitCompletionRecord {
    pub fn new(habit_id: Uuid, completed: bool, timestamp: NaiveDate) -> Self {
        Self {
            habit_id,
            completed,
            mood: None,
            notes: None,
            time_of_day: None,
            timestamp,
        }
    }
}

//
// ================= Streak =================
//

/// Consecutive-day completion run of a habit.
///
/// `end_date == None` means the streak is open. `longest_length >= current_length`
/// holds after every update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Streak {
    pub habit_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub current_length: u32,
    pub longest_length: u32,
}

//
// ================= User Context =================
//

/// Derived per query from the completion log; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserContext {
    pub mood: Sentiment,
    pub recent_progress: Progress,
    pub habit_streak: u32,
    pub recent_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
}

impl Default for UserContext {
    fn default() -> Self {
        Self {
            mood: Sentiment::Neutral,
            recent_progress: Progress::Stable,
            habit_streak: 0,
            recent_success: true,
            preferred_time: None,
            success_rate: None,
        }
    }
}

//
// ================= Response =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    pub habit: String,
    pub message: String,
    pub optimal_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressAnalysis {
    pub overall_progress: Progress,
    pub current_streak: u32,
    pub success_rate: Option<f64>,
    pub recommendations: Vec<String>,
}

/// Output of the response layer. Persisting it is the caller's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponsePayload {
    pub message: String,
    pub suggestions: Vec<String>,
    pub reminders: Vec<Reminder>,
    pub motivation: String,
    pub analysis: Option<ProgressAnalysis>,
}

impl ResponsePayload {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

//
// ================= Reports =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressReport {
    pub total_entries: usize,
    pub completed_entries: usize,
    /// Percentage rounded to two decimals
    pub completion_rate: f64,
    pub current_streak: u32,
    pub period_days: i64,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Progress::Improving => "improving",
            Progress::Stable => "stable",
            Progress::Declining => "declining",
        };
        write!(f, "{}", s)
    }
}
