//! Interaction log
//!
//! Every answered query is recorded with an integrity hash so the
//! conversation history can be audited and summarised later.

use crate::models::Sentiment;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Where the reply text came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Generated,
    Templated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub interaction_id: Uuid,
    pub user_id: Uuid,
    pub query: String,
    pub response: String,
    /// Intent label, or `ai_generated` for generator replies
    pub intent: String,
    pub sentiment: Sentiment,
    pub source: ReplySource,
    pub created_at: DateTime<Utc>,
    pub integrity_hash: String,
}

/// Hashed fields of an interaction
#[derive(Serialize)]
struct HashedFields<'a> {
    user_id: &'a Uuid,
    query: &'a str,
    response: &'a str,
    intent: &'a str,
    sentiment: &'a Sentiment,
}

impl InteractionRecord {
    pub fn new(
        user_id: Uuid,
        query: String,
        response: String,
        intent: String,
        sentiment: Sentiment,
        source: ReplySource,
    ) -> Result<Self> {
        let mut record = Self {
            interaction_id: Uuid::new_v4(),
            user_id,
            query,
            response,
            intent,
            sentiment,
            source,
            created_at: Utc::now(),
            integrity_hash: String::new(),
        };
        record.integrity_hash = compute_interaction_hash(&record)?;
        Ok(record)
    }
}

/// Interaction storage
pub struct InteractionLog {
    records: Arc<RwLock<HashMap<Uuid, InteractionRecord>>>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store an interaction record
    pub async fn record(&self, record: InteractionRecord) -> Result<Uuid> {
        let interaction_id = record.interaction_id;
        let mut records = self.records.write().await;
        records.insert(interaction_id, record);
        Ok(interaction_id)
    }

    /// Retrieve a record by ID
    pub async fn get(&self, interaction_id: Uuid) -> Result<Option<InteractionRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&interaction_id).cloned())
    }

    /// All records for a user, oldest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<InteractionRecord>> {
        let records = self.records.read().await;

        let mut items: Vec<InteractionRecord> = records
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();

        items.sort_by_key(|record| record.created_at);

        Ok(items)
    }

    /// Snapshot of every record, oldest first
    pub async fn all(&self) -> Vec<InteractionRecord> {
        let records = self.records.read().await;
        let mut items: Vec<InteractionRecord> = records.values().cloned().collect();
        items.sort_by_key(|record| record.created_at);
        items
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Verify a record's integrity via hash
    pub async fn verify_integrity(&self, interaction_id: Uuid) -> Result<bool> {
        let records = self.records.read().await;

        if let Some(record) = records.get(&interaction_id) {
            Ok(compute_interaction_hash(record)? == record.integrity_hash)
        } else {
            Ok(false)
        }
    }
}

impl Default for InteractionLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute SHA256 hash of an interaction's content
/// Uses zero-copy streaming serialization into hasher
pub fn compute_interaction_hash(record: &InteractionRecord) -> Result<String> {
    let fields = HashedFields {
        user_id: &record.user_id,
        query: &record.query,
        response: &record.response,
        intent: &record.intent,
        sentiment: &record.sentiment,
    };

    let mut hasher = Sha256::new();

    // Stream JSON directly into hasher (no intermediate String)
    serde_json::to_writer(&mut HashWriter(&mut hasher), &fields)?;

    Ok(hex::encode(hasher.finalize()))
}

/// Adapter to allow writing into Sha256 via std::io::Write
struct HashWriter<'a, H: Digest>(&'a mut H);

impl<'a, H: Digest> Write for HashWriter<'a, H> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: Uuid, query: &str) -> InteractionRecord {
        InteractionRecord::new(
            user_id,
            query.to_string(),
            "reply".to_string(),
            "guidance".to_string(),
            Sentiment::Neutral,
            ReplySource::Templated,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_record_and_verify() {
        let log = InteractionLog::new();
        let id = log.record(record(Uuid::new_v4(), "help me")).await.unwrap();

        assert!(log.verify_integrity(id).await.unwrap());
        assert!(!log.verify_integrity(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_tampering_breaks_hash() {
        let log = InteractionLog::new();
        let mut tampered = record(Uuid::new_v4(), "help me");
        tampered.response = "something else".to_string();
        let id = log.record(tampered).await.unwrap();

        assert!(!log.verify_integrity(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let log = InteractionLog::new();
        let user = Uuid::new_v4();
        log.record(record(user, "first")).await.unwrap();
        log.record(record(user, "second")).await.unwrap();
        log.record(record(Uuid::new_v4(), "other")).await.unwrap();

        let mine = log.list_for_user(user).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(log.len().await, 3);
    }

    #[test]
    fn test_hash_is_stable() {
        let a = record(Uuid::nil(), "same");
        let b = record(Uuid::nil(), "same");
        assert_eq!(a.integrity_hash, b.integrity_hash);
        assert_eq!(a.integrity_hash.len(), 64);
    }

    #[test]
    fn test_hash_errors_surface_as_serialization() {
        let rec = record(Uuid::new_v4(), "check");
        assert_eq!(compute_interaction_hash(&rec).unwrap(), rec.integrity_hash);

        let err: crate::CoachError = serde_json::from_str::<Sentiment>("\"bogus\"")
            .unwrap_err()
            .into();
        assert!(matches!(err, crate::CoachError::SerializationError(_)));
    }
}
