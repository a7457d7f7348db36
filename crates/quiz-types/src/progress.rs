//! Per-user answer progress types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest recorded outcome for a (user, question) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    Correct,
    Incorrect,
}

impl AnswerStatus {
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        }
    }
}

impl std::fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerStatus::Correct => write!(f, "correct"),
            AnswerStatus::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// One ledger row. At most one entry exists per (user_id, question_id);
/// recording again replaces the status and refreshes the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub user_id: i64,
    pub question_id: i64,
    pub status: AnswerStatus,
    pub timestamp: DateTime<Utc>,
}

/// A user's answered question ids partitioned by latest status. The two
/// lists are disjoint by construction of the ledger key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub correct_ids: Vec<i64>,
    pub incorrect_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AnswerStatus::Correct).unwrap(),
            "\"correct\""
        );
        assert_eq!(AnswerStatus::Incorrect.to_string(), "incorrect");
    }

    #[test]
    fn status_from_correct() {
        assert_eq!(AnswerStatus::from_correct(true), AnswerStatus::Correct);
        assert_eq!(AnswerStatus::from_correct(false), AnswerStatus::Incorrect);
    }
}
