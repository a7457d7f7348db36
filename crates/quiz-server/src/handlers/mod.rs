//! HTTP handlers

pub mod answer;
pub mod health;
pub mod login;
pub mod progress;
pub mod questions;

pub use health::health;

use serde::Serialize;

/// Envelope returned by mutating endpoints: `{success, message}`.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Bare error object returned by read endpoints: `{error}`.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
