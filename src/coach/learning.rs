//! Periodic interaction summaries
//!
//! `LearningTask` owns a tokio task that re-summarises the interaction log
//! on a fixed interval. It runs until `shutdown` is called; dropping the
//! handle without shutting down aborts the task.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::audit::{InteractionLog, InteractionRecord, ReplySource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningSummary {
    pub total_interactions: usize,
    pub generated_replies: usize,
    /// Count per recorded intent label
    pub by_intent: BTreeMap<String, usize>,
    /// Count per sentiment label
    pub by_sentiment: BTreeMap<String, usize>,
    pub computed_at: DateTime<Utc>,
}

impl LearningSummary {
    /// Most frequent intent label; ties go to the first label in order
    pub fn top_intent(&self) -> Option<&str> {
        let mut top: Option<(&String, usize)> = None;
        for (label, count) in &self.by_intent {
            if top.map_or(true, |(_, best)| *count > best) {
                top = Some((label, *count));
            }
        }
        top.map(|(label, _)| label.as_str())
    }
}

pub fn summarize(records: &[InteractionRecord]) -> LearningSummary {
    let mut by_intent = BTreeMap::new();
    let mut by_sentiment = BTreeMap::new();

    for record in records {
        *by_intent.entry(record.intent.clone()).or_insert(0) += 1;
        *by_sentiment.entry(record.sentiment.to_string()).or_insert(0) += 1;
    }

    LearningSummary {
        total_interactions: records.len(),
        generated_replies: records
            .iter()
            .filter(|r| r.source == ReplySource::Generated)
            .count(),
        by_intent,
        by_sentiment,
        computed_at: Utc::now(),
    }
}

pub struct LearningTask {
    handle: Option<JoinHandle<()>>,
    shutdown_tx: watch::Sender<bool>,
    latest: Arc<RwLock<Option<LearningSummary>>>,
}

impl LearningTask {
    /// Start summarising `log` every `interval`; the first pass runs immediately
    pub fn spawn(log: Arc<InteractionLog>, interval: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let latest = Arc::new(RwLock::new(None));
        let slot = Arc::clone(&latest);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            info!(interval_secs = interval.as_secs(), "Learning task started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let summary = summarize(&log.all().await);
                        debug!(
                            total = summary.total_interactions,
                            generated = summary.generated_replies,
                            "Interactions summarised"
                        );
                        *slot.write().await = Some(summary);
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Learning task stopped");
        });

        Self {
            handle: Some(handle),
            shutdown_tx,
            latest,
        }
    }

    /// Latest summary, if a pass has completed
    pub async fn latest(&self) -> Option<LearningSummary> {
        self.latest.read().await.clone()
    }

    /// Signal the task to stop and wait for it to finish
    pub async fn shutdown(mut self) {
        // receiver already gone means the task has exited
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "Learning task ended abnormally");
            }
        }
    }
}

impl Drop for LearningTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
