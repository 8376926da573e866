//! External text generation seam
//!
//! The coach asks a `TextGenerator` first and falls back to templates when
//! the generator fails or returns something too short to be useful.
//! No network client ships with the crate; callers plug one in.

use async_trait::async_trait;

use crate::models::UserContext;
use crate::Result;

/// Opaque text generator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Reply to `query` under `system_prompt`
    async fn generate(&self, system_prompt: &str, query: &str) -> Result<String>;
}

/// System prompt embedding the user context and the query
pub fn build_system_prompt(context: &UserContext, query: &str) -> String {
    let base_prompt = r#"You are a coach specializing in habit formation, personal development, and motivation.

Your role is to provide helpful, encouraging, and practical advice to help users build better habits and achieve their goals.

Key Principles:
- Start small and build gradually
- Focus on consistency over perfection
- Celebrate small wins and progress
- Provide actionable, specific advice
- Be encouraging and supportive
- Always respond to the specific question asked
- Personalize the advice to the user's context"#;

    let streak = if context.habit_streak > 0 {
        format!("{} days", context.habit_streak)
    } else {
        "none".to_string()
    };

    format!(
        "{}\n\nUser Context:\n- mood: {}\n- recent progress: {}\n- current streak: {}\n- recent success: {}\n\nCurrent User Query: {}",
        base_prompt,
        context.mood,
        context.recent_progress,
        streak,
        if context.recent_success { "yes" } else { "no" },
        query
    )
}

/// Accept a generated reply only when it is longer than `min_len` once trimmed
pub(crate) fn usable_reply(reply: &str, min_len: usize) -> Option<String> {
    let trimmed = reply.trim();
    if trimmed.chars().count() > min_len {
        Some(trimmed.to_string())
    } else {
        None
    }
}
