use habit_coach::{
    coach::learning::LearningTask,
    state::InMemoryHabitStore,
    CoachConfig, Frequency, HabitCoach, UserPreferences,
};
use chrono::{Days, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE_QUERIES: &[&str] = &[
    "I need motivation to exercise",
    "Help me build better study habits",
    "Remind me to meditate",
    "How am I doing with my habits?",
    "I'm feeling stressed about my progress",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CoachConfig::from_env()?;
    info!(?config, "Habit coach starting");

    let learning_interval = config.learning_interval();
    let coach = HabitCoach::new(config, Arc::new(InMemoryHabitStore::new()));
    let learning = LearningTask::spawn(coach.interactions(), learning_interval);
    let mut rng = StdRng::from_entropy();

    // Create a sample user with two habits
    let user = coach
        .add_user(
            "Test User",
            UserPreferences {
                preferred_time: Some("morning".to_string()),
                coaching_style: Some("motivational".to_string()),
            },
        )
        .await?;

    let exercise = coach
        .add_habit(user.user_id, "Exercise", "Daily workout", Some("health".to_string()), Frequency::Daily)
        .await?;
    let study = coach
        .add_habit(user.user_id, "Study", "Learning new skills", Some("learning".to_string()), Frequency::Daily)
        .await?;

    // A week of history, oldest first
    let today = Utc::now().date_naive();
    for days_ago in (1..=6u64).rev() {
        let day = today
            .checked_sub_days(Days::new(days_ago))
            .ok_or("date out of range")?;

        coach
            .log_completion(exercise.habit_id, days_ago != 4, None, None, Some("morning".to_string()), day)
            .await?;
        coach
            .log_completion(study.habit_id, days_ago % 2 == 0, Some("okay".to_string()), None, Some("evening".to_string()), day)
            .await?;
    }

    println!("\n=== HABIT COACH DEMO ===");

    for query in SAMPLE_QUERIES {
        let reply = coach.process_query(user.user_id, query, None, &mut rng).await?;
        let payload = &reply.payload;

        println!("\nUser: {}", query);
        println!("Coach [{}]: {}", reply.intent, payload.message);

        if !payload.motivation.is_empty() {
            println!("Motivation: {}", payload.motivation);
        }
        if !payload.suggestions.is_empty() {
            println!("Suggestions:");
            for suggestion in &payload.suggestions {
                println!("  - {}", suggestion);
            }
        }
        if !payload.reminders.is_empty() {
            println!("Reminders:");
            for reminder in &payload.reminders {
                println!("  - {} ({})", reminder.message, reminder.optimal_time);
            }
        }
        if let Some(analysis) = &payload.analysis {
            println!(
                "Analysis: {} trend, {}-day streak",
                analysis.overall_progress, analysis.current_streak
            );
        }
    }

    println!("\n=== INSIGHTS ===");
    let insights = coach.user_insights(user.user_id).await?;
    for recommendation in &insights.recommendations {
        println!("  - {}", recommendation);
    }

    let report = coach.progress_report(user.user_id, 30).await?;
    println!("\n=== PROGRESS (last {} days) ===", report.period_days);
    println!(
        "{}/{} completed ({:.2}%), current streak {}",
        report.completed_entries, report.total_entries, report.completion_rate, report.current_streak
    );

    let session = coach.coaching_session(user.user_id, "motivation", &mut rng).await?;
    println!("\n=== COACHING SESSION ===");
    println!("{}", session.message);
    println!("{}", session.motivation);

    if let Some(streak) = coach.streak(exercise.habit_id).await? {
        println!(
            "\nExercise streak: {} (longest {})",
            streak.current_length, streak.longest_length
        );
    }

    // Let the learning task catch up before reading its summary
    tokio::time::sleep(Duration::from_millis(50)).await;
    if let Some(summary) = learning.latest().await {
        info!(
            total = summary.total_interactions,
            top_intent = summary.top_intent().unwrap_or("none"),
            "Latest learning summary"
        );
    }

    learning.shutdown().await;

    Ok(())
}
