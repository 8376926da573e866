//! Response selection
//!
//! Two-level dispatch: the primary intent picks a handler, the handler scans
//! the lower-cased query for keywords to pick a template, then context
//! overrides add suggestions, reminders, quotes and analysis.

pub mod coach;
pub mod reminder;
mod templates;

use rand::Rng;

use crate::classifier::{Classification, Entities, Intent};
use crate::models::{Progress, ProgressAnalysis, ResponsePayload, UserContext};
pub use coach::{CoachingTone, PersonalizedCoach};
pub use reminder::{ReminderStyle, SmartReminder};
use templates::pick;

const MAX_SUGGESTIONS: usize = 5;

const EXERCISE_LIKE: &[&str] = &["exercise", "workout"];
const STUDY_LIKE: &[&str] = &["study", "learning"];

/// Stateless response builder; randomness comes from the caller
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseSelector {
    coach: PersonalizedCoach,
    reminder: SmartReminder,
}

impl ResponseSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coach(&self) -> &PersonalizedCoach {
        &self.coach
    }

    pub fn reminder(&self) -> &SmartReminder {
        &self.reminder
    }

    /// Build the payload for a classified query
    pub fn select<R: Rng + ?Sized>(
        &self,
        classification: &Classification,
        context: &UserContext,
        query: &str,
        rng: &mut R,
    ) -> ResponsePayload {
        self.respond(
            classification.primary_intent(),
            &classification.entities,
            context,
            query,
            rng,
        )
    }

    /// Build the payload for an explicit primary intent
    pub fn respond<R: Rng + ?Sized>(
        &self,
        intent: Intent,
        entities: &Entities,
        context: &UserContext,
        query: &str,
        rng: &mut R,
    ) -> ResponsePayload {
        let query_lower = query.to_lowercase();

        match intent {
            Intent::Motivation => ResponsePayload {
                message: pick(templates::MOTIVATION, templates::MOTIVATION_DEFAULT, &query_lower)
                    .to_string(),
                motivation: self.coach.motivational_quote(Some(query), rng),
                ..ResponsePayload::default()
            },
            Intent::Guidance => ResponsePayload {
                message: pick(templates::GUIDANCE, templates::GUIDANCE_DEFAULT, &query_lower)
                    .to_string(),
                suggestions: guidance_suggestions(entities, context),
                ..ResponsePayload::default()
            },
            Intent::Reminder => self.reminder_response(entities, context, rng),
            Intent::Analysis => analysis_response(context),
            Intent::HabitFormation => ResponsePayload {
                message: pick(
                    templates::HABIT_FORMATION,
                    templates::HABIT_FORMATION_DEFAULT,
                    &query_lower,
                )
                .to_string(),
                suggestions: habit_formation_steps(&query_lower),
                ..ResponsePayload::default()
            },
            _ => ResponsePayload::with_message(general_message(&query_lower)),
        }
    }

    fn reminder_response<R: Rng + ?Sized>(
        &self,
        entities: &Entities,
        context: &UserContext,
        rng: &mut R,
    ) -> ResponsePayload {
        let Some(habit) = entities.habits.first() else {
            return ResponsePayload::with_message(templates::REMINDER_NO_HABIT);
        };

        let reminder = self.reminder.reminder(habit, context, rng);
        ResponsePayload {
            message: reminder.message.clone(),
            reminders: vec![reminder],
            ..ResponsePayload::default()
        }
    }
}

/// Habit-specific tips first, then context tips, capped at five
fn guidance_suggestions(entities: &Entities, context: &UserContext) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    if let Some(habit) = entities.habits.first() {
        let habit = habit.to_lowercase();
        if EXERCISE_LIKE.contains(&habit.as_str()) {
            suggestions.extend(templates::EXERCISE_TIPS.iter().map(|s| s.to_string()));
        } else if STUDY_LIKE.contains(&habit.as_str()) {
            suggestions.extend(templates::STUDY_TIPS.iter().map(|s| s.to_string()));
        }
    }

    if context.recent_progress == Progress::Declining {
        suggestions.push(templates::DECLINING_TIP.to_string());
    }
    if context.habit_streak > 7 {
        suggestions.push(templates::LONG_STREAK_TIP.to_string());
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn analysis_response(context: &UserContext) -> ResponsePayload {
    let message = match context.recent_progress {
        Progress::Improving => templates::ANALYSIS_IMPROVING,
        Progress::Declining => templates::ANALYSIS_DECLINING,
        Progress::Stable => templates::ANALYSIS_STABLE,
    };

    ResponsePayload {
        message: message.to_string(),
        analysis: Some(progress_analysis(context)),
        ..ResponsePayload::default()
    }
}

/// Structured progress summary attached to analysis responses
pub fn progress_analysis(context: &UserContext) -> ProgressAnalysis {
    let recommendation = if context.recent_success {
        templates::KEEP_GOING
    } else {
        templates::FOCUS_ON_CONSISTENCY
    };

    ProgressAnalysis {
        overall_progress: context.recent_progress,
        current_streak: context.habit_streak,
        success_rate: context.success_rate,
        recommendations: vec![recommendation.to_string()],
    }
}

fn habit_formation_steps(query_lower: &str) -> Vec<String> {
    let steps = if query_lower.contains("morning") {
        templates::MORNING_STEPS
    } else if query_lower.contains("evening") {
        templates::EVENING_STEPS
    } else if query_lower.contains("exercise") || query_lower.contains("workout") {
        templates::EXERCISE_STEPS
    } else {
        templates::GENERAL_STEPS
    };

    steps.iter().map(|s| s.to_string()).collect()
}

fn general_message(query_lower: &str) -> &'static str {
    if query_lower.contains("hello") || query_lower.contains("hi") {
        templates::GREETING
    } else if query_lower.contains("help") || query_lower.contains("support") {
        templates::SUPPORT
    } else if query_lower.contains("thank") {
        templates::GRATITUDE
    } else if query_lower.contains("how") && query_lower.contains("are") {
        templates::STATUS
    } else {
        templates::GENERAL_DEFAULT
    }
}
