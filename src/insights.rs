//! Habit pattern analysis and progress reports

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::models::{Habit, HabitCompletionRecord, ProgressReport};
use crate::streak::StreakTracker;

const MAX_RECOMMENDATIONS: usize = 5;
const LOW_CONSISTENCY: f64 = 0.5;
const UNKNOWN_LABEL: &str = "unknown";

const GENERAL_RECOMMENDATIONS: &[&str] = &[
    "Start with small, achievable goals to build momentum.",
    "Use habit stacking - link new habits to existing routines.",
    "Track your progress to stay motivated and identify patterns.",
    "Celebrate small wins to reinforce positive behavior.",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitAnalysis {
    /// Success rate per time-of-day label
    pub best_times: BTreeMap<String, f64>,
    /// Success rate per habit name
    pub consistency_scores: BTreeMap<String, f64>,
    pub recommendations: Vec<String>,
}

#[derive(Default)]
struct Tally {
    completed: usize,
    total: usize,
}

impl Tally {
    fn add(&mut self, completed: bool) {
        self.total += 1;
        if completed {
            self.completed += 1;
        }
    }

    fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HabitAnalyzer;

impl HabitAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyse completion records; habits resolve record ids to names
    pub fn analyze(&self, records: &[HabitCompletionRecord], habits: &[Habit]) -> HabitAnalysis {
        if records.is_empty() {
            return HabitAnalysis::default();
        }

        let names: HashMap<Uuid, &str> = habits
            .iter()
            .map(|h| (h.habit_id, h.name.as_str()))
            .collect();

        let mut by_time: BTreeMap<String, Tally> = BTreeMap::new();
        let mut by_habit: BTreeMap<String, Tally> = BTreeMap::new();

        for record in records {
            let time = record.time_of_day.as_deref().unwrap_or(UNKNOWN_LABEL);
            by_time.entry(time.to_string()).or_default().add(record.completed);

            let habit = names.get(&record.habit_id).copied().unwrap_or(UNKNOWN_LABEL);
            by_habit.entry(habit.to_string()).or_default().add(record.completed);
        }

        let mut analysis = HabitAnalysis {
            best_times: by_time.into_iter().map(|(k, t)| (k, t.rate())).collect(),
            consistency_scores: by_habit.into_iter().map(|(k, t)| (k, t.rate())).collect(),
            recommendations: Vec::new(),
        };
        analysis.recommendations = recommendations(&analysis);

        analysis
    }
}

fn recommendations(analysis: &HabitAnalysis) -> Vec<String> {
    let mut out = Vec::new();

    // first maximum in label order
    let mut best: Option<(&String, f64)> = None;
    for (label, rate) in &analysis.best_times {
        if best.map_or(true, |(_, top)| *rate > top) {
            best = Some((label, *rate));
        }
    }
    if let Some((label, _)) = best {
        out.push(format!(
            "Try to schedule your most important habits around {} for better success rates.",
            label
        ));
    }

    let low: Vec<&str> = analysis
        .consistency_scores
        .iter()
        .filter(|(_, rate)| **rate < LOW_CONSISTENCY)
        .map(|(name, _)| name.as_str())
        .take(3)
        .collect();
    if !low.is_empty() {
        out.push(format!("Focus on building consistency for: {}", low.join(", ")));
    }

    out.extend(GENERAL_RECOMMENDATIONS.iter().map(|s| s.to_string()));
    out.truncate(MAX_RECOMMENDATIONS);
    out
}

/// Completion totals over a period; records ordered oldest first
pub fn progress_report(records: &[HabitCompletionRecord], period_days: i64) -> ProgressReport {
    let total = records.len();
    let completed = records.iter().filter(|r| r.completed).count();
    let rate = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    ProgressReport {
        total_entries: total,
        completed_entries: completed,
        completion_rate: (rate * 100.0).round() / 100.0,
        current_streak: StreakTracker::current_streak_length(records),
        period_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::{NaiveDate, Utc};

    fn habit(name: &str) -> Habit {
        Habit {
            habit_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            category: None,
            frequency: Frequency::Daily,
            reminder_time: "morning".to_string(),
            created_at: Utc::now(),
        }
    }

    fn record(habit: &Habit, completed: bool, time: Option<&str>, day: u32) -> HabitCompletionRecord {
        let mut r = HabitCompletionRecord::new(
            habit.habit_id,
            completed,
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        );
        r.time_of_day = time.map(str::to_string);
        r
    }

    #[test]
    fn test_empty_analysis() {
        let analysis = HabitAnalyzer::new().analyze(&[], &[]);
        assert_eq!(analysis, HabitAnalysis::default());
    }

    #[test]
    fn test_best_times_and_consistency() {
        let run = habit("Run");
        let read = habit("Read");
        let records = vec![
            record(&run, true, Some("morning"), 1),
            record(&run, true, Some("morning"), 2),
            record(&run, false, Some("evening"), 3),
            record(&read, false, None, 1),
            record(&read, false, Some("evening"), 2),
            record(&read, true, Some("evening"), 3),
        ];

        let analysis = HabitAnalyzer::new().analyze(&records, &[run, read]);

        assert_eq!(analysis.best_times["morning"], 1.0);
        assert!((analysis.best_times["evening"] - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(analysis.best_times["unknown"], 0.0);
        assert!((analysis.consistency_scores["Run"] - 2.0 / 3.0).abs() < 1e-9);

        assert_eq!(analysis.recommendations.len(), 5);
        assert!(analysis.recommendations[0].contains("around morning"));
        assert_eq!(analysis.recommendations[1], "Focus on building consistency for: Read");
    }

    #[test]
    fn test_progress_report() {
        let run = habit("Run");
        let records = vec![
            record(&run, true, None, 1),
            record(&run, false, None, 2),
            record(&run, true, None, 3),
        ];

        let report = progress_report(&records, 30);
        assert_eq!(report.total_entries, 3);
        assert_eq!(report.completed_entries, 2);
        assert_eq!(report.completion_rate, 66.67);
        assert_eq!(report.current_streak, 1);

        let empty = progress_report(&[], 7);
        assert_eq!(empty.completion_rate, 0.0);
        assert_eq!(empty.period_days, 7);
    }
}
