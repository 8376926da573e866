//! Intent Classifier
//!
//! Scores free-form text against fixed keyword tables:
//! - Intent: ten categories, `min(matches * 0.3, 1.0)` each
//! - Sentiment: strict maximum of positive / negative / neutral counts
//! - Entities: habit keywords, time references and digit runs
//!
//! Deterministic and stateless; never fails on string input.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::models::Sentiment;

/// Coarse purpose of a user message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Motivation,
    Guidance,
    Reminder,
    Analysis,
    GoalSetting,
    HabitFormation,
    StressRelief,
    Productivity,
    Health,
    Learning,
    /// Sentinel when nothing scored
    General,
}

impl Intent {
    /// Scored intents in declaration order; ties resolve to the earliest
    pub const SCORED: [Intent; 10] = [
        Intent::Motivation,
        Intent::Guidance,
        Intent::Reminder,
        Intent::Analysis,
        Intent::GoalSetting,
        Intent::HabitFormation,
        Intent::StressRelief,
        Intent::Productivity,
        Intent::Health,
        Intent::Learning,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Intent::Motivation => "motivation",
            Intent::Guidance => "guidance",
            Intent::Reminder => "reminder",
            Intent::Analysis => "analysis",
            Intent::GoalSetting => "goal_setting",
            Intent::HabitFormation => "habit_formation",
            Intent::StressRelief => "stress_relief",
            Intent::Productivity => "productivity",
            Intent::Health => "health",
            Intent::Learning => "learning",
            Intent::General => "general",
        }
    }

    /// Inverse of `label`; unknown labels yield `None`
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::SCORED
            .into_iter()
            .chain(std::iter::once(Intent::General))
            .find(|intent| intent.label() == label)
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Intent::Motivation => MOTIVATION_KEYWORDS,
            Intent::Guidance => GUIDANCE_KEYWORDS,
            Intent::Reminder => REMINDER_KEYWORDS,
            Intent::Analysis => ANALYSIS_KEYWORDS,
            Intent::GoalSetting => GOAL_SETTING_KEYWORDS,
            Intent::HabitFormation => HABIT_FORMATION_KEYWORDS,
            Intent::StressRelief => STRESS_RELIEF_KEYWORDS,
            Intent::Productivity => PRODUCTIVITY_KEYWORDS,
            Intent::Health => HEALTH_KEYWORDS,
            Intent::Learning => LEARNING_KEYWORDS,
            Intent::General => &[],
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Static keyword lists, zero allocation
const MOTIVATION_KEYWORDS: &[&str] = &["motivat", "inspire", "encourage", "boost", "energy"];
const GUIDANCE_KEYWORDS: &[&str] = &["help", "guide", "advice", "suggest", "recommend"];
const REMINDER_KEYWORDS: &[&str] = &["remind", "remember", "alert", "notify"];
const ANALYSIS_KEYWORDS: &[&str] = &["analyze", "review", "assess", "evaluate", "progress"];
const GOAL_SETTING_KEYWORDS: &[&str] = &["goal", "target", "objective", "plan", "strategy"];
const HABIT_FORMATION_KEYWORDS: &[&str] = &["habit", "routine", "consistency", "discipline"];
const STRESS_RELIEF_KEYWORDS: &[&str] = &["stress", "anxiety", "relax", "calm", "peace"];
const PRODUCTIVITY_KEYWORDS: &[&str] = &["productive", "efficient", "focus", "concentrate"];
const HEALTH_KEYWORDS: &[&str] = &["health", "fitness", "wellness", "exercise", "diet"];
const LEARNING_KEYWORDS: &[&str] = &["learn", "study", "knowledge", "skill", "improve"];

const POSITIVE_KEYWORDS: &[&str] = &["good", "great", "excellent", "amazing", "wonderful", "happy"];
const NEGATIVE_KEYWORDS: &[&str] = &["bad", "terrible", "awful", "sad", "depressed", "angry"];
const NEUTRAL_KEYWORDS: &[&str] = &["okay", "fine", "alright", "normal", "usual"];

/// Habit names recognised in text, reported in this order
pub const HABIT_KEYWORDS: &[&str] = &[
    "exercise", "meditation", "reading", "writing", "learning",
    "workout", "study", "practice", "walk", "run", "sleep",
    "water", "vitamins", "journal", "planning", "cleaning",
];

// Compile patterns once
static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d+ (hour|minute|day|week|month)s?",
        r"tomorrow",
        r"today",
        r"next week",
        r"this month",
        r"morning",
        r"afternoon",
        r"evening",
        r"night",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex: time reference pattern"))
    .collect()
});

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid regex: digit run"));

//
// ================= Results =================
//

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    pub intent: Intent,
    pub score: f64,
}

/// Scores for every scored intent, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScores(Vec<IntentScore>);

impl IntentScores {
    pub fn get(&self, intent: Intent) -> f64 {
        self.0
            .iter()
            .find(|s| s.intent == intent)
            .map(|s| s.score)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntentScore> {
        self.0.iter()
    }

    /// Highest score wins, first in declaration order on ties; `General`
    /// when every score is zero.
    pub fn primary(&self) -> Intent {
        let mut best = Intent::General;
        let mut best_score = 0.0;

        for entry in &self.0 {
            if entry.score > best_score {
                best_score = entry.score;
                best = entry.intent;
            }
        }

        best
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    pub habits: Vec<String>,
    /// Whole matched phrase, e.g. "30 minutes", not just the unit
    pub time_references: Vec<String>,
    pub numbers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub intent_scores: IntentScores,
    pub sentiment: Sentiment,
    pub entities: Entities,
}

impl Classification {
    pub fn primary_intent(&self) -> Intent {
        self.intent_scores.primary()
    }
}

//
// ================= Classifier =================
//

/// Keyword-table classifier
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();

        Classification {
            intent_scores: self.score_intents(&lowered),
            sentiment: self.sentiment(&lowered),
            entities: self.extract_entities(text, &lowered),
        }
    }

    fn score_intents(&self, lowered: &str) -> IntentScores {
        let scores = Intent::SCORED
            .iter()
            .map(|intent| {
                let matches = count_all(lowered, intent.keywords());
                IntentScore {
                    intent: *intent,
                    score: (matches as f64 * 0.3).min(1.0),
                }
            })
            .collect();

        IntentScores(scores)
    }

    fn sentiment(&self, lowered: &str) -> Sentiment {
        let positive = count_all(lowered, POSITIVE_KEYWORDS);
        let negative = count_all(lowered, NEGATIVE_KEYWORDS);
        let neutral = count_all(lowered, NEUTRAL_KEYWORDS);

        if positive > negative && positive > neutral {
            Sentiment::Positive
        } else if negative > positive && negative > neutral {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    fn extract_entities(&self, original: &str, lowered: &str) -> Entities {
        let habits = HABIT_KEYWORDS
            .iter()
            .filter(|kw| lowered.contains(**kw))
            .map(|kw| kw.to_string())
            .collect();

        let time_references = TIME_PATTERNS
            .iter()
            .flat_map(|pattern| pattern.find_iter(lowered).map(|m| m.as_str().to_string()))
            .collect();

        let numbers = NUMBER_PATTERN
            .find_iter(original)
            .map(|m| m.as_str().to_string())
            .collect();

        Entities {
            habits,
            time_references,
            numbers,
        }
    }
}

/// Total occurrences of every keyword, overlapping matches included
fn count_all(haystack: &str, keywords: &[&str]) -> usize {
    keywords
        .iter()
        .map(|kw| count_overlapping(haystack, kw))
        .sum()
}

fn count_overlapping(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    haystack
        .char_indices()
        .filter(|(i, _)| haystack[*i..].starts_with(needle))
        .count()
}
