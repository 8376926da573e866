//! State persistence layer
//!
//! Responsible for storing users, habits, the completion log and streaks.
//! Currently uses in-memory; any backend implementing `HabitStore` can be swapped in.

use crate::error::CoachError;
use crate::models::{Habit, HabitCompletionRecord, Streak, User};
use crate::Result;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Trait for state persistence
#[async_trait::async_trait]
pub trait HabitStore: Send + Sync {
    async fn insert_user(&self, user: User) -> Result<()>;
    async fn load_user(&self, user_id: Uuid) -> Result<Option<User>>;
    async fn insert_habit(&self, habit: Habit) -> Result<()>;
    async fn load_habit(&self, habit_id: Uuid) -> Result<Option<Habit>>;
    async fn habits_for_user(&self, user_id: Uuid) -> Result<Vec<Habit>>;
    /// Append one record; the log is never rewritten
    async fn append_completion(&self, record: HabitCompletionRecord) -> Result<()>;
    /// Records of one habit, oldest first
    async fn completions_for_habit(&self, habit_id: Uuid) -> Result<Vec<HabitCompletionRecord>>;
    /// Records of all the user's habits on or after `since`, oldest first.
    /// Records sharing a day keep the order they were appended in.
    async fn completions_for_user(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> Result<Vec<HabitCompletionRecord>>;
    async fn save_streak(&self, streak: &Streak) -> Result<()>;
    async fn load_streak(&self, habit_id: Uuid) -> Result<Option<Streak>>;
}

/// Completion log with a store-wide append sequence
#[derive(Default)]
struct CompletionLog {
    next_seq: u64,
    by_habit: HashMap<Uuid, Vec<(u64, HabitCompletionRecord)>>,
}

/// In-memory state store for development
pub struct InMemoryHabitStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    habits: Arc<RwLock<HashMap<Uuid, Habit>>>,
    completions: Arc<RwLock<CompletionLog>>,
    streaks: Arc<RwLock<HashMap<Uuid, Streak>>>,
}

impl InMemoryHabitStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            habits: Arc::new(RwLock::new(HashMap::new())),
            completions: Arc::new(RwLock::new(CompletionLog::default())),
            streaks: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryHabitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HabitStore for InMemoryHabitStore {

    async fn insert_user(&self, user: User) -> Result<()> {
        let mut users = self.users.write().await;
        users.insert(user.user_id, user);
        Ok(())
    }

    async fn load_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn insert_habit(&self, habit: Habit) -> Result<()> {
        {
            let users = self.users.read().await;
            if !users.contains_key(&habit.user_id) {
                return Err(CoachError::UserNotFound(habit.user_id.to_string()));
            }
        }

        let mut habits = self.habits.write().await;
        habits.insert(habit.habit_id, habit);
        Ok(())
    }

    async fn load_habit(&self, habit_id: Uuid) -> Result<Option<Habit>> {
        let habits = self.habits.read().await;
        Ok(habits.get(&habit_id).cloned())
    }

    async fn habits_for_user(&self, user_id: Uuid) -> Result<Vec<Habit>> {
        let habits = self.habits.read().await;

        let mut owned: Vec<Habit> = habits
            .values()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|h| h.created_at);

        Ok(owned)
    }

    async fn append_completion(&self, record: HabitCompletionRecord) -> Result<()> {
        let mut completions = self.completions.write().await;
        let seq = completions.next_seq;
        completions.next_seq += 1;
        completions
            .by_habit
            .entry(record.habit_id)
            .or_insert_with(Vec::new)
            .push((seq, record));
        Ok(())
    }

    async fn completions_for_habit(&self, habit_id: Uuid) -> Result<Vec<HabitCompletionRecord>> {
        let completions = self.completions.read().await;

        Ok(completions
            .by_habit
            .get(&habit_id)
            .map(|log| log.iter().map(|(_, r)| r.clone()).collect())
            .unwrap_or_default())
    }

    async fn completions_for_user(
        &self,
        user_id: Uuid,
        since: NaiveDate,
    ) -> Result<Vec<HabitCompletionRecord>> {
        let habit_ids: Vec<Uuid> = {
            let habits = self.habits.read().await;
            habits
                .values()
                .filter(|h| h.user_id == user_id)
                .map(|h| h.habit_id)
                .collect()
        };

        let completions = self.completions.read().await;

        // Flatten all records for this user
        let mut sequenced: Vec<&(u64, HabitCompletionRecord)> = habit_ids
            .iter()
            .filter_map(|id| completions.by_habit.get(id))
            .flat_map(|log| log.iter())
            .filter(|(_, r)| r.timestamp >= since)
            .collect();

        sequenced.sort_by_key(|(seq, r)| (r.timestamp, *seq));

        Ok(sequenced.into_iter().map(|(_, r)| r.clone()).collect())
    }

    async fn save_streak(&self, streak: &Streak) -> Result<()> {
        let mut streaks = self.streaks.write().await;
        streaks.insert(streak.habit_id, streak.clone());
        Ok(())
    }

    async fn load_streak(&self, habit_id: Uuid) -> Result<Option<Streak>> {
        let streaks = self.streaks.read().await;
        Ok(streaks.get(&habit_id).cloned())
    }
}
