//! Runtime configuration
//!
//! Defaults can be overridden through `COACH_*` environment variables.
//! The binary loads `.env` before calling [`CoachConfig::from_env`].

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoachError;
use crate::response::reminder::DEFAULT_REMINDER_TIME;
use crate::streak::DEFAULT_PROGRESS_WINDOW;
use crate::Result;

pub const ENV_PROGRESS_WINDOW: &str = "COACH_PROGRESS_WINDOW";
pub const ENV_HISTORY_DAYS: &str = "COACH_HISTORY_DAYS";
pub const ENV_INSIGHTS_DAYS: &str = "COACH_INSIGHTS_DAYS";
pub const ENV_MIN_GENERATED_LEN: &str = "COACH_MIN_GENERATED_LEN";
pub const ENV_LEARNING_INTERVAL_SECS: &str = "COACH_LEARNING_INTERVAL_SECS";
pub const ENV_DEFAULT_REMINDER_TIME: &str = "COACH_DEFAULT_REMINDER_TIME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Records considered by the progress trend
    pub progress_window: usize,
    /// Days of history used to build a user context
    pub history_days: i64,
    /// Days of history used by insights
    pub insights_days: i64,
    /// Generated replies must be longer than this after trimming
    pub min_generated_len: usize,
    pub learning_interval_secs: u64,
    pub default_reminder_time: String,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            progress_window: DEFAULT_PROGRESS_WINDOW,
            history_days: 7,
            insights_days: 30,
            min_generated_len: 20,
            learning_interval_secs: 3600,
            default_reminder_time: DEFAULT_REMINDER_TIME.to_string(),
        }
    }
}

impl CoachConfig {
    /// Defaults overridden by whatever `COACH_*` variables are set
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            progress_window: parse_or(&lookup, ENV_PROGRESS_WINDOW, defaults.progress_window)?,
            history_days: parse_or(&lookup, ENV_HISTORY_DAYS, defaults.history_days)?,
            insights_days: parse_or(&lookup, ENV_INSIGHTS_DAYS, defaults.insights_days)?,
            min_generated_len: parse_or(&lookup, ENV_MIN_GENERATED_LEN, defaults.min_generated_len)?,
            learning_interval_secs: parse_or(
                &lookup,
                ENV_LEARNING_INTERVAL_SECS,
                defaults.learning_interval_secs,
            )?,
            default_reminder_time: lookup(ENV_DEFAULT_REMINDER_TIME)
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.default_reminder_time),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.progress_window == 0 {
            return Err(CoachError::Config(format!("{} must be positive", ENV_PROGRESS_WINDOW)));
        }
        if self.history_days < 1 {
            return Err(CoachError::Config(format!("{} must be at least 1", ENV_HISTORY_DAYS)));
        }
        if self.insights_days < 1 {
            return Err(CoachError::Config(format!("{} must be at least 1", ENV_INSIGHTS_DAYS)));
        }
        if self.learning_interval_secs == 0 {
            return Err(CoachError::Config(format!(
                "{} must be positive",
                ENV_LEARNING_INTERVAL_SECS
            )));
        }
        Ok(())
    }

    pub fn learning_interval(&self) -> Duration {
        Duration::from_secs(self.learning_interval_secs)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| CoachError::Config(format!("{}={:?}: {}", key, raw, e))),
    }
}
