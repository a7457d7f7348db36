//! User types

use serde::{Deserialize, Serialize};

/// A quiz user. Created on first login for a new username; never updated
/// or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}
