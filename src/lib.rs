//! Habit Coach
//!
//! The decision core of a habit-tracking assistant:
//! - Tracks day-granularity streaks from an append-only completion log
//! - Classifies free-form messages by keyword scoring (intent, sentiment, entities)
//! - Selects templated coaching responses, suggestions and reminders
//! - Falls back to templates whenever the external text generator is absent or weak
//!
//! FLOW:
//! TEXT → CLASSIFY → CONTEXT (from history) → GENERATE? → SELECT → RECORD

pub mod audit;
pub mod classifier;
pub mod coach;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod insights;
pub mod models;
pub mod response;
pub mod state;
pub mod streak;

pub use error::{CoachError, Result};

// Re-export common types
pub use models::*;
pub use classifier::{Classification, Entities, Intent, IntentClassifier};
pub use coach::HabitCoach;
pub use config::CoachConfig;
pub use response::ResponseSelector;
pub use streak::StreakTracker;
