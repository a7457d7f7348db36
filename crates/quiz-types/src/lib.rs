//! Quiz Types - Pure type definitions for the quiz service
//!
//! This crate contains only data types and the shared error taxonomy, with
//! no async runtime or database dependencies.

pub mod error;
pub mod progress;
pub mod question;
pub mod user;

pub use error::{QuizError, Result};
pub use progress::*;
pub use question::*;
pub use user::*;
