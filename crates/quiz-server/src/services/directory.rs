//! Username resolution service (login doubles as registration)

use crate::storage::Database;
use quiz_types::{QuizError, Result, User};
use std::sync::Arc;
use tracing::info;

pub struct UserDirectory {
    db: Arc<Database>,
}

impl UserDirectory {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Look up a username, creating the user on first sight. Returns the
    /// user and whether this call created it.
    ///
    /// Two concurrent creations racing on the same username surface as
    /// `QuizError::Conflict` from the unique constraint; the caller retries
    /// as a plain lookup (or, at the API layer, reports 409).
    pub async fn resolve_or_create(&self, username: &str) -> Result<(User, bool)> {
        let username = username.trim();
        if username.is_empty() {
            return Err(QuizError::Validation(
                "Username cannot be empty.".to_string(),
            ));
        }

        if let Some(user) = self.db.get_user_by_username(username).await? {
            return Ok((user, false));
        }

        info!("User '{}' does not exist, creating", username);
        let id = self.db.create_user(username).await?;

        Ok((
            User {
                id,
                username: username.to_string(),
            },
            true,
        ))
    }

    pub async fn lookup(&self, username: &str) -> Result<User> {
        self.db
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| QuizError::UserNotFound(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn directory() -> UserDirectory {
        let db = Arc::new(Database::in_memory().await.unwrap());
        UserDirectory::new(db)
    }

    #[tokio::test]
    async fn test_resolve_replay_returns_same_id() {
        let directory = directory().await;

        let (first, created) = directory.resolve_or_create("alice").await.unwrap();
        assert!(created);

        let (second, created) = directory.resolve_or_create("alice").await.unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_resolve_trims_and_rejects_blank() {
        let directory = directory().await;

        let err = directory.resolve_or_create("   ").await.unwrap_err();
        assert!(matches!(err, QuizError::Validation(_)));

        // Surrounding whitespace resolves to the same user.
        let (first, _) = directory.resolve_or_create("alice").await.unwrap();
        let (second, created) = directory.resolve_or_create("  alice ").await.unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_lookup_unknown_user() {
        let directory = directory().await;

        let err = directory.lookup("nobody").await.unwrap_err();
        assert!(matches!(err, QuizError::UserNotFound(_)));
    }
}
