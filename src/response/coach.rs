//! Coaching tone and motivational quotes

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::classifier::Intent;
use crate::models::{Progress, Sentiment, UserContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachingTone {
    Supportive,
    Challenging,
    Motivational,
    Analytical,
}

impl CoachingTone {
    /// Supportive for a low mood or a declining trend, challenging past a
    /// week-long streak, motivational for motivation requests, else analytical.
    pub fn select(context: &UserContext, intent: Intent) -> Self {
        if context.mood == Sentiment::Negative || context.recent_progress == Progress::Declining {
            CoachingTone::Supportive
        } else if context.habit_streak > 7 {
            CoachingTone::Challenging
        } else if intent == Intent::Motivation {
            CoachingTone::Motivational
        } else {
            CoachingTone::Analytical
        }
    }

    fn phrasings(&self) -> &'static [&'static str; 3] {
        match self {
            CoachingTone::Motivational => &[
                "You've got this! Remember why you started.",
                "Every step forward is progress, no matter how small.",
                "Your future self will thank you for today's efforts.",
            ],
            CoachingTone::Analytical => &[
                "Let's analyze what's working and what needs adjustment.",
                "Based on your data, here are the key insights.",
                "Consider these factors for optimal habit formation.",
            ],
            CoachingTone::Supportive => &[
                "It's okay to have off days. What matters is getting back up.",
                "You're doing better than you think. Let's review your progress.",
                "Remember, building habits is a journey, not a destination.",
            ],
            CoachingTone::Challenging => &[
                "Are you really giving it your all, or just going through the motions?",
                "Your goals don't care about your excuses. What's your next move?",
                "The only person you're competing with is yourself from yesterday.",
            ],
        }
    }
}

const QUOTES: &[&str] = &[
    "The only bad workout is the one that didn't happen.",
    "Small progress is still progress.",
    "Your future self is watching you right now through memories.",
    "Discipline is choosing between what you want now and what you want most.",
    "Every expert was once a beginner.",
    "The difference between try and triumph is just a little umph!",
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
    "The only way to do great work is to love what you do.",
];

/// First matching keyword decides the suffix
const QUOTE_EMOJI: &[(&str, &str)] = &[("exercise", "💪"), ("study", "📚"), ("health", "🌟")];

#[derive(Debug, Default, Clone, Copy)]
pub struct PersonalizedCoach;

impl PersonalizedCoach {
    pub fn new() -> Self {
        Self
    }

    /// Short coaching line in the tone the context calls for
    pub fn personalized_message<R: Rng + ?Sized>(
        &self,
        context: &UserContext,
        intent: Intent,
        rng: &mut R,
    ) -> String {
        let tone = CoachingTone::select(context, intent);
        let mut message = tone
            .phrasings()
            .choose(rng)
            .copied()
            .unwrap_or_default()
            .to_string();

        if context.habit_streak > 0 {
            message.push_str(&format!(
                " You're on a {}-day streak - that's amazing!",
                context.habit_streak
            ));
        }

        match context.mood {
            Sentiment::Positive => message.push_str(" Your positive energy is contagious!"),
            Sentiment::Negative => {
                message.push_str(" Remember, tough times don't last, but tough people do.")
            }
            Sentiment::Neutral => {}
        }

        message
    }

    /// Random quote, with an emoji suffix when the context names a topic
    pub fn motivational_quote<R: Rng + ?Sized>(&self, context: Option<&str>, rng: &mut R) -> String {
        let mut quote = QUOTES.choose(rng).copied().unwrap_or_default().to_string();

        if let Some(context) = context {
            let lowered = context.to_lowercase();
            if let Some((_, emoji)) = QUOTE_EMOJI.iter().find(|(kw, _)| lowered.contains(kw)) {
                quote.push(' ');
                quote.push_str(emoji);
            }
        }

        quote
    }
}
