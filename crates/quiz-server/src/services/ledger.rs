//! Progress ledger service
//!
//! Tracks the latest correct/incorrect outcome per (user, question) pair.

use crate::storage::Database;
use quiz_types::{AnswerStatus, ProgressSummary, Result};
use std::sync::Arc;
use tracing::debug;

pub struct ProgressLedger {
    db: Arc<Database>,
}

impl ProgressLedger {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Upsert the entry for (user_id, question_id). Idempotent: replaying
    /// the same call yields the same final state.
    pub async fn record(&self, user_id: i64, question_id: i64, is_correct: bool) -> Result<()> {
        let status = AnswerStatus::from_correct(is_correct);
        self.db
            .upsert_progress(user_id, question_id, status)
            .await?;

        debug!(
            "Recorded answer for user {}, question {}: {}",
            user_id, question_id, status
        );
        Ok(())
    }

    /// Partition all recorded question ids for the user by status. The
    /// partitions are disjoint because the ledger holds one row per pair.
    pub async fn get_progress(&self, user_id: i64) -> Result<ProgressSummary> {
        let entries = self.db.list_progress(user_id).await?;

        let mut summary = ProgressSummary::default();
        for entry in entries {
            match entry.status {
                AnswerStatus::Correct => summary.correct_ids.push(entry.question_id),
                AnswerStatus::Incorrect => summary.incorrect_ids.push(entry.question_id),
            }
        }
        Ok(summary)
    }
}
