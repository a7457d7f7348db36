//! Question catalog types

use serde::{Deserialize, Serialize};

/// A quiz question as stored in the static catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub options: Vec<String>,
}
