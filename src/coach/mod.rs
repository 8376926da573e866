//! Habit coach facade - composes the core with storage and generation
//!
//! QUERY → CLASSIFY → CONTEXT → GENERATE? → TEMPLATE FALLBACK → RECORD

pub mod learning;

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::audit::{InteractionLog, InteractionRecord, ReplySource};
use crate::classifier::{Intent, IntentClassifier};
use crate::config::CoachConfig;
use crate::context::UserContextBuilder;
use crate::error::CoachError;
use crate::generator::{build_system_prompt, usable_reply, TextGenerator};
use crate::insights::{self, HabitAnalysis, HabitAnalyzer};
use crate::models::{
    Frequency, Habit, HabitCompletionRecord, ProgressReport, Reminder, ResponsePayload, Sentiment,
    Streak, User, UserContext, UserPreferences,
};
use crate::response::ResponseSelector;
use crate::state::HabitStore;
use crate::streak::StreakTracker;
use crate::Result;

/// Interaction intent label for generator replies
pub const GENERATED_INTENT_LABEL: &str = "ai_generated";

/// Reply to a user query plus what was recorded about it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachReply {
    pub payload: ResponsePayload,
    pub intent: Intent,
    pub sentiment: Sentiment,
    pub source: ReplySource,
    pub interaction_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingSession {
    pub session_type: String,
    pub message: String,
    pub motivation: String,
    pub analysis: HabitAnalysis,
    pub recommendations: Vec<String>,
}

pub struct HabitCoach {
    config: CoachConfig,
    store: Arc<dyn HabitStore>,
    generator: Option<Arc<dyn TextGenerator>>,
    classifier: IntentClassifier,
    selector: ResponseSelector,
    analyzer: HabitAnalyzer,
    context_builder: UserContextBuilder,
    interactions: Arc<InteractionLog>,
}

impl HabitCoach {
    pub fn new(config: CoachConfig, store: Arc<dyn HabitStore>) -> Self {
        let context_builder = UserContextBuilder::new(config.progress_window);

        Self {
            config,
            store,
            generator: None,
            classifier: IntentClassifier::new(),
            selector: ResponseSelector::new(),
            analyzer: HabitAnalyzer::new(),
            context_builder,
            interactions: Arc::new(InteractionLog::new()),
        }
    }

    /// Ask `generator` before falling back to templates
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Shared handle for background summarisation
    pub fn interactions(&self) -> Arc<InteractionLog> {
        Arc::clone(&self.interactions)
    }

    // ================= Users & Habits =================

    pub async fn add_user(&self, name: &str, preferences: UserPreferences) -> Result<User> {
        let user = User {
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            preferences,
            created_at: Utc::now(),
        };

        self.store.insert_user(user.clone()).await?;
        info!(user_id = ?user.user_id, name = %user.name, "User created");

        Ok(user)
    }

    /// Register a habit; its reminder slot comes from the timing table,
    /// then the user's preferred time, then the configured default.
    pub async fn add_habit(
        &self,
        user_id: Uuid,
        name: &str,
        description: &str,
        category: Option<String>,
        frequency: Frequency,
    ) -> Result<Habit> {
        let user = self.require_user(user_id).await?;

        let reminder_time = self
            .selector
            .reminder()
            .optimal_time(name, Some(self.preferred_time(&user).as_str()));

        let habit = Habit {
            habit_id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            description: description.to_string(),
            category,
            frequency,
            reminder_time,
            created_at: Utc::now(),
        };

        self.store.insert_habit(habit.clone()).await?;
        info!(
            habit_id = ?habit.habit_id,
            user_id = ?user_id,
            name = %habit.name,
            reminder_time = %habit.reminder_time,
            "Habit created"
        );

        Ok(habit)
    }

    pub async fn habits(&self, user_id: Uuid) -> Result<Vec<Habit>> {
        self.store.habits_for_user(user_id).await
    }

    pub async fn streak(&self, habit_id: Uuid) -> Result<Option<Streak>> {
        self.store.load_streak(habit_id).await
    }

    // ================= Completion Log =================

    /// Record one day's outcome for a habit and return the updated streak.
    ///
    /// Each habit takes at most one entry per day and days must move
    /// forward. Unlogged days between the last entry and `day` count as a
    /// miss. The streak update is computed before anything is written, so
    /// a rejected entry leaves the log and streak untouched. A habit whose
    /// first entry is a miss has no streak yet.
    pub async fn log_completion(
        &self,
        habit_id: Uuid,
        completed: bool,
        mood: Option<String>,
        notes: Option<String>,
        time_of_day: Option<String>,
        day: NaiveDate,
    ) -> Result<Option<Streak>> {
        if self.store.load_habit(habit_id).await?.is_none() {
            return Err(CoachError::HabitNotFound(habit_id.to_string()));
        }

        let log = self.store.completions_for_habit(habit_id).await?;
        let last_day = log.last().map(|r| r.timestamp);
        if let Some(last) = last_day {
            if day == last {
                return Err(CoachError::InvalidState(format!(
                    "habit {} already has an entry for {}",
                    habit_id, day
                )));
            }
            if day < last {
                return Err(CoachError::InvalidState(format!(
                    "completion for {} precedes last logged day {}",
                    day, last
                )));
            }
        }

        let streak = match self.store.load_streak(habit_id).await? {
            Some(existing) => {
                let existing = match last_day.and_then(|last| first_missed_day(last, day)) {
                    Some(missed) => StreakTracker::update(&existing, false, missed)?,
                    None => existing,
                };
                Some(StreakTracker::update(&existing, completed, day)?)
            }
            None if completed => Some(Streak::start(habit_id, day)),
            None => None,
        };

        let record = HabitCompletionRecord {
            habit_id,
            completed,
            mood,
            notes,
            time_of_day,
            timestamp: day,
        };
        self.store.append_completion(record).await?;

        if let Some(streak) = &streak {
            self.store.save_streak(streak).await?;
        }

        info!(
            habit_id = ?habit_id,
            completed,
            day = %day,
            current_streak = streak.as_ref().map(|s| s.current_length).unwrap_or(0),
            "Completion logged"
        );

        Ok(streak)
    }

    // ================= Queries =================

    /// Classify `text` and build the templated response for `context`
    pub fn classify_and_respond<R: Rng + ?Sized>(
        &self,
        text: &str,
        context: &UserContext,
        rng: &mut R,
    ) -> ResponsePayload {
        let classification = self.classifier.classify(text);
        self.selector.select(&classification, context, text, rng)
    }

    /// Answer a user's query and record the interaction.
    ///
    /// A configured generator is asked first; its reply is used only when
    /// it succeeds with enough text. Otherwise the templated response is
    /// returned. `mood` overrides the mood recorded in the completion log.
    pub async fn process_query<R: Rng + ?Sized>(
        &self,
        user_id: Uuid,
        query: &str,
        mood: Option<Sentiment>,
        rng: &mut R,
    ) -> Result<CoachReply> {
        let user = self.require_user(user_id).await?;

        let classification = self.classifier.classify(query);
        let intent = classification.primary_intent();
        let sentiment = classification.sentiment;

        debug!(
            user_id = ?user_id,
            intent = %intent,
            sentiment = %sentiment,
            "Query classified"
        );

        let context = self.user_context(&user, mood).await?;

        let (payload, source) = match self.generate(&context, query).await {
            Some(message) => (ResponsePayload::with_message(message), ReplySource::Generated),
            None => (
                self.selector.select(&classification, &context, query, rng),
                ReplySource::Templated,
            ),
        };

        let intent_label = match source {
            ReplySource::Generated => GENERATED_INTENT_LABEL,
            ReplySource::Templated => intent.label(),
        };

        let record = InteractionRecord::new(
            user_id,
            query.to_string(),
            payload.message.clone(),
            intent_label.to_string(),
            sentiment,
            source,
        )?;
        let interaction_id = self.interactions.record(record).await?;

        info!(
            user_id = ?user_id,
            interaction_id = ?interaction_id,
            intent = intent_label,
            source = ?source,
            "Query answered"
        );

        Ok(CoachReply {
            payload,
            intent,
            sentiment,
            source,
            interaction_id,
        })
    }

    async fn generate(&self, context: &UserContext, query: &str) -> Option<String> {
        let generator = self.generator.as_ref()?;
        let prompt = build_system_prompt(context, query);

        match generator.generate(&prompt, query).await {
            Ok(reply) => {
                let usable = usable_reply(&reply, self.config.min_generated_len);
                if usable.is_none() {
                    debug!(len = reply.trim().len(), "Generated reply too short, using templates");
                }
                usable
            }
            Err(e) => {
                warn!(error = %e, "Text generator failed, using templates");
                None
            }
        }
    }

    // ================= Insights & Coaching =================

    pub async fn user_insights(&self, user_id: Uuid) -> Result<HabitAnalysis> {
        self.require_user(user_id).await?;

        let since = days_before(today(), self.config.insights_days)?;
        let records = self.store.completions_for_user(user_id, since).await?;
        let habits = self.store.habits_for_user(user_id).await?;

        Ok(self.analyzer.analyze(&records, &habits))
    }

    /// Totals over the last `days` days across all of the user's habits
    pub async fn progress_report(&self, user_id: Uuid, days: i64) -> Result<ProgressReport> {
        self.require_user(user_id).await?;

        if days < 1 {
            return Err(CoachError::InvalidState(format!(
                "progress period must be at least one day, got {}",
                days
            )));
        }

        let since = days_before(today(), days)?;
        let records = self.store.completions_for_user(user_id, since).await?;
        let report = insights::progress_report(&records, days);

        info!(
            user_id = ?user_id,
            period_days = days,
            completion_rate = report.completion_rate,
            "Progress report generated"
        );

        Ok(report)
    }

    pub async fn generate_reminder<R: Rng + ?Sized>(
        &self,
        user_id: Uuid,
        habit_name: &str,
        rng: &mut R,
    ) -> Result<Reminder> {
        let user = self.require_user(user_id).await?;
        let context = self.user_context(&user, None).await?;

        let reminder = self.selector.reminder().reminder(habit_name, &context, rng);
        info!(user_id = ?user_id, habit = %habit_name, "Reminder generated");

        Ok(reminder)
    }

    pub fn motivational_quote<R: Rng + ?Sized>(&self, context: Option<&str>, rng: &mut R) -> String {
        self.selector.coach().motivational_quote(context, rng)
    }

    /// Personalised coaching message, quote and insights in one bundle.
    /// `session_type` is an intent label; unknown labels coach generally.
    pub async fn coaching_session<R: Rng + ?Sized>(
        &self,
        user_id: Uuid,
        session_type: &str,
        rng: &mut R,
    ) -> Result<CoachingSession> {
        let user = self.require_user(user_id).await?;
        let context = self.user_context(&user, None).await?;
        let analysis = self.user_insights(user_id).await?;

        let intent = Intent::from_label(session_type).unwrap_or(Intent::General);
        let message = self.selector.coach().personalized_message(&context, intent, rng);
        let motivation = self.selector.coach().motivational_quote(None, rng);

        info!(user_id = ?user_id, session_type = %session_type, "Coaching session started");

        Ok(CoachingSession {
            session_type: session_type.to_string(),
            message,
            motivation,
            recommendations: analysis.recommendations.clone(),
            analysis,
        })
    }

    // ================= Helpers =================

    async fn require_user(&self, user_id: Uuid) -> Result<User> {
        self.store
            .load_user(user_id)
            .await?
            .ok_or_else(|| CoachError::UserNotFound(user_id.to_string()))
    }

    async fn user_context(&self, user: &User, mood: Option<Sentiment>) -> Result<UserContext> {
        let since = days_before(today(), self.config.history_days)?;
        let records = self.store.completions_for_user(user.user_id, since).await?;

        Ok(self
            .context_builder
            .build(&records, mood, Some(self.preferred_time(user))))
    }

    fn preferred_time(&self, user: &User) -> String {
        user.preferences
            .preferred_time
            .clone()
            .unwrap_or_else(|| self.config.default_reminder_time.clone())
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Day after `last` when at least one unlogged day separates it from `day`
fn first_missed_day(last: NaiveDate, day: NaiveDate) -> Option<NaiveDate> {
    last.checked_add_days(Days::new(1)).filter(|next| *next < day)
}

fn days_before(day: NaiveDate, days: i64) -> Result<NaiveDate> {
    let days = u64::try_from(days)
        .map_err(|_| CoachError::InvalidState(format!("negative day count {}", days)))?;

    day.checked_sub_days(Days::new(days))
        .ok_or_else(|| CoachError::InvalidState(format!("{} days before {} is out of range", days, day)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InMemoryHabitStore;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio_test::{assert_err, assert_ok};

    enum MockGenerator {
        Reply(&'static str),
        Fail,
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, system_prompt: &str, query: &str) -> Result<String> {
            assert!(system_prompt.contains(query));
            match self {
                MockGenerator::Reply(text) => Ok(text.to_string()),
                MockGenerator::Fail => Err(CoachError::Generator("unavailable".to_string())),
            }
        }
    }

    fn coach() -> HabitCoach {
        HabitCoach::new(CoachConfig::default(), Arc::new(InMemoryHabitStore::new()))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn ago(days: u64) -> NaiveDate {
        today().checked_sub_days(Days::new(days)).unwrap()
    }

    async fn user_with_habit(coach: &HabitCoach, habit: &str) -> (User, Habit) {
        let user = coach.add_user("Alex", UserPreferences::default()).await.unwrap();
        let habit = coach
            .add_habit(user.user_id, habit, "", None, Frequency::Daily)
            .await
            .unwrap();
        (user, habit)
    }

    async fn log(coach: &HabitCoach, habit: &Habit, completed: bool, day: NaiveDate) -> Result<Option<Streak>> {
        coach.log_completion(habit.habit_id, completed, None, None, None, day).await
    }

    #[tokio::test]
    async fn test_add_habit_picks_reminder_time() {
        let coach = coach();
        let user = coach
            .add_user(
                "Sam",
                UserPreferences {
                    preferred_time: Some("evening".to_string()),
                    coaching_style: None,
                },
            )
            .await
            .unwrap();

        let workout = assert_ok!(coach.add_habit(user.user_id, "workout", "", None, Frequency::Daily).await);
        let water = assert_ok!(coach.add_habit(user.user_id, "water", "", None, Frequency::Daily).await);

        assert_eq!(workout.reminder_time, "afternoon");
        assert_eq!(water.reminder_time, "evening");

        let missing = coach.add_habit(Uuid::new_v4(), "run", "", None, Frequency::Daily).await;
        assert!(matches!(missing, Err(CoachError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_log_completion_tracks_streak() {
        let coach = coach();
        let (_, habit) = user_with_habit(&coach, "exercise").await;

        assert_ok!(log(&coach, &habit, true, ago(4)).await);
        assert_ok!(log(&coach, &habit, true, ago(3)).await);
        let streak = assert_ok!(log(&coach, &habit, true, ago(2)).await).unwrap();
        assert_eq!(streak.current_length, 3);
        assert_eq!(streak.start_date, ago(4));

        let streak = assert_ok!(log(&coach, &habit, false, ago(1)).await).unwrap();
        assert_eq!(streak.current_length, 0);
        assert_eq!(streak.longest_length, 3);
        assert_eq!(streak.end_date, Some(ago(2)));

        let streak = assert_ok!(log(&coach, &habit, true, ago(0)).await).unwrap();
        assert_eq!(streak.current_length, 1);
        assert_eq!(streak.start_date, ago(0));
        assert_eq!(coach.streak(habit.habit_id).await.unwrap(), Some(streak));
    }

    #[tokio::test]
    async fn test_out_of_order_completion_is_rejected_without_writes() {
        let coach = coach();
        let (_, habit) = user_with_habit(&coach, "reading").await;

        assert_ok!(log(&coach, &habit, true, ago(2)).await);
        let before = coach.streak(habit.habit_id).await.unwrap();

        let result = log(&coach, &habit, true, ago(3)).await;
        assert!(matches!(result, Err(CoachError::InvalidState(_))));

        assert_eq!(coach.streak(habit.habit_id).await.unwrap(), before);
        assert_eq!(coach.store.completions_for_habit(habit.habit_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_second_entry_for_same_day_is_rejected() {
        let coach = coach();
        let (_, habit) = user_with_habit(&coach, "exercise").await;

        assert_ok!(log(&coach, &habit, true, ago(0)).await);
        let before = coach.streak(habit.habit_id).await.unwrap();

        for completed in [true, false] {
            let result = log(&coach, &habit, completed, ago(0)).await;
            assert!(matches!(result, Err(CoachError::InvalidState(_))));
        }

        let after = coach.streak(habit.habit_id).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(after.unwrap().current_length, 1);
        assert_eq!(coach.store.completions_for_habit(habit.habit_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unlogged_days_break_the_streak() {
        let coach = coach();
        let (_, habit) = user_with_habit(&coach, "exercise").await;

        assert_ok!(log(&coach, &habit, true, ago(20)).await);
        let streak = assert_ok!(log(&coach, &habit, true, ago(0)).await).unwrap();
        assert_eq!(streak.current_length, 1);
        assert_eq!(streak.start_date, ago(0));
        assert_eq!(streak.longest_length, 1);

        let (_, habit) = user_with_habit(&coach, "reading").await;
        assert_ok!(log(&coach, &habit, true, ago(3)).await);
        assert_ok!(log(&coach, &habit, true, ago(2)).await);
        // nothing logged for ago(1)
        let streak = assert_ok!(log(&coach, &habit, true, ago(0)).await).unwrap();
        assert_eq!(streak.current_length, 1);
        assert_eq!(streak.start_date, ago(0));
        assert_eq!(streak.longest_length, 2);
    }

    #[tokio::test]
    async fn test_same_day_habits_report_consistently() {
        for _ in 0..20 {
            let coach = coach();
            let (user, done) = user_with_habit(&coach, "exercise").await;
            let skipped = coach
                .add_habit(user.user_id, "reading", "", None, Frequency::Daily)
                .await
                .unwrap();

            log(&coach, &done, true, ago(1)).await.unwrap();
            log(&coach, &skipped, false, ago(1)).await.unwrap();
            let report = coach.progress_report(user.user_id, 7).await.unwrap();
            assert_eq!(report.current_streak, 0);

            log(&coach, &skipped, false, ago(0)).await.unwrap();
            log(&coach, &done, true, ago(0)).await.unwrap();
            let report = coach.progress_report(user.user_id, 7).await.unwrap();
            assert_eq!(report.current_streak, 1);
        }
    }

    #[tokio::test]
    async fn test_first_miss_has_no_streak() {
        let coach = coach();
        let (_, habit) = user_with_habit(&coach, "meditation").await;

        assert_eq!(assert_ok!(log(&coach, &habit, false, ago(1)).await), None);

        let unknown = coach
            .log_completion(Uuid::new_v4(), true, None, None, None, ago(0))
            .await;
        assert!(matches!(unknown, Err(CoachError::HabitNotFound(_))));
    }

    #[tokio::test]
    async fn test_process_query_templated_and_recorded() {
        let coach = coach();
        let (user, _) = user_with_habit(&coach, "exercise").await;

        let reply = assert_ok!(
            coach
                .process_query(user.user_id, "I need motivation to exercise", None, &mut rng())
                .await
        );

        assert_eq!(reply.source, ReplySource::Templated);
        assert_eq!(reply.intent, Intent::Motivation);
        assert!(!reply.payload.motivation.is_empty());

        let record = coach.interactions.get(reply.interaction_id).await.unwrap().unwrap();
        assert_eq!(record.intent, "motivation");
        assert_eq!(record.response, reply.payload.message);
        assert!(coach.interactions.verify_integrity(reply.interaction_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_process_query_prefers_generated_reply() {
        let coach = coach().with_generator(Arc::new(MockGenerator::Reply(
            "  Try pairing your run with your morning coffee.  ",
        )));
        let (user, _) = user_with_habit(&coach, "running").await;

        let reply = assert_ok!(coach.process_query(user.user_id, "help me run", None, &mut rng()).await);

        assert_eq!(reply.source, ReplySource::Generated);
        assert_eq!(reply.payload.message, "Try pairing your run with your morning coffee.");
        assert!(reply.payload.suggestions.is_empty());

        let record = coach.interactions.get(reply.interaction_id).await.unwrap().unwrap();
        assert_eq!(record.intent, GENERATED_INTENT_LABEL);
    }

    #[tokio::test]
    async fn test_process_query_falls_back() {
        for generator in [MockGenerator::Reply("ok!"), MockGenerator::Fail] {
            let coach = coach().with_generator(Arc::new(generator));
            let (user, _) = user_with_habit(&coach, "exercise").await;

            let reply = assert_ok!(
                coach
                    .process_query(user.user_id, "remind me to exercise", None, &mut rng())
                    .await
            );
            assert_eq!(reply.source, ReplySource::Templated);
            assert_eq!(reply.payload.reminders.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_process_query_unknown_user() {
        let coach = coach();
        let result = coach.process_query(Uuid::new_v4(), "hello", None, &mut rng()).await;
        assert_err!(result);
        assert!(coach.interactions.is_empty().await);
    }

    #[tokio::test]
    async fn test_mood_override_shapes_reminder_context() {
        let coach = coach();
        let (user, habit) = user_with_habit(&coach, "exercise").await;
        coach
            .log_completion(habit.habit_id, true, Some("great".to_string()), None, None, ago(1))
            .await
            .unwrap();

        let reply = coach
            .process_query(user.user_id, "remind me to exercise", Some(Sentiment::Negative), &mut rng())
            .await
            .unwrap();
        assert_eq!(
            reply.payload.reminders[0].message,
            "Remember your exercise goal. Small steps lead to big changes."
        );
    }

    #[tokio::test]
    async fn test_progress_report_and_insights() {
        let coach = coach();
        let (user, habit) = user_with_habit(&coach, "exercise").await;

        for (days, completed) in [(5, true), (4, false), (3, true), (2, true)] {
            let slot = if completed { "morning" } else { "evening" };
            coach
                .log_completion(habit.habit_id, completed, None, None, Some(slot.to_string()), ago(days))
                .await
                .unwrap();
        }

        let report = assert_ok!(coach.progress_report(user.user_id, 30).await);
        assert_eq!(report.total_entries, 4);
        assert_eq!(report.completed_entries, 3);
        assert_eq!(report.completion_rate, 75.0);
        assert_eq!(report.current_streak, 2);

        let recent = assert_ok!(coach.progress_report(user.user_id, 3).await);
        assert_eq!(recent.total_entries, 2);

        assert_err!(coach.progress_report(user.user_id, 0).await);

        let insights = assert_ok!(coach.user_insights(user.user_id).await);
        assert_eq!(insights.best_times["morning"], 1.0);
        assert_eq!(insights.consistency_scores["exercise"], 0.75);
    }

    #[tokio::test]
    async fn test_reminder_and_coaching_session() {
        let coach = coach();
        let (user, habit) = user_with_habit(&coach, "journaling").await;
        for days in (1..=3).rev() {
            log(&coach, &habit, true, ago(days)).await.unwrap();
        }

        let reminder = assert_ok!(coach.generate_reminder(user.user_id, "water", &mut rng()).await);
        assert_eq!(reminder.optimal_time, "morning");
        assert!(reminder.message.contains("water"));

        let session = assert_ok!(coach.coaching_session(user.user_id, "motivation", &mut rng()).await);
        assert_eq!(session.session_type, "motivation");
        assert!(session.message.contains("3-day streak"));
        assert!(!session.motivation.is_empty());
        assert_eq!(session.recommendations, session.analysis.recommendations);
    }

    #[test]
    fn test_classify_and_respond() {
        let coach = coach();

        let payload = coach.classify_and_respond(
            "What's my progress this week?",
            &UserContext::default(),
            &mut rng(),
        );
        assert!(payload.message.contains("Your progress has been stable"));
        assert!(payload.suggestions.is_empty());
        let analysis = payload.analysis.unwrap();
        assert_eq!(analysis.overall_progress, crate::models::Progress::Stable);
        assert_eq!(analysis.recommendations, vec!["Keep up the great work!"]);

        let struggling = UserContext {
            recent_progress: crate::models::Progress::Declining,
            recent_success: false,
            habit_streak: 2,
            ..UserContext::default()
        };
        let payload = coach.classify_and_respond("Can you review how I'm doing?", &struggling, &mut rng());
        assert!(payload.message.contains("struggling lately"));
        let analysis = payload.analysis.unwrap();
        assert_eq!(analysis.current_streak, 2);
        assert_eq!(analysis.recommendations, vec!["Focus on consistency over perfection"]);
    }
}
