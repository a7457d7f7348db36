//! Error types for the quiz service

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Catalog unavailable: {0}")]
    Catalog(String),
}

impl From<serde_json::Error> for QuizError {
    fn from(e: serde_json::Error) -> Self {
        QuizError::Catalog(e.to_string())
    }
}
