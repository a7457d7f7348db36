//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quiz_types::{AnswerStatus, ProgressEntry, Question, QuizError, User};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        // FK clauses in the schema are documentation only (as in the original
        // app); sqlx enables the foreign_keys pragma by default, so turn it
        // back off to keep progress rows independent of the questions table.
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(false)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    /// In-memory database on a single pooled connection. Every pooled
    /// connection would otherwise get its own empty database.
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .foreign_keys(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Users table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Questions table (options stay in the catalog file)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY,
                question TEXT NOT NULL,
                answer TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Progress table: one row per (user, question)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_progress (
                user_id INTEGER NOT NULL,
                question_id INTEGER NOT NULL,
                status TEXT NOT NULL CHECK(status IN ('correct', 'incorrect')),
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (user_id) REFERENCES users (id),
                FOREIGN KEY (question_id) REFERENCES questions (id),
                PRIMARY KEY (user_id, question_id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    // User operations

    pub async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, QuizError> {
        let row: Option<(i64, String)> = sqlx::query_as(
            r#"
            SELECT id, username FROM users WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(|(id, username)| User { id, username }))
    }

    pub async fn create_user(&self, username: &str) -> Result<i64, QuizError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username) VALUES (?1)
            "#,
        )
        .bind(username)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.last_insert_rowid())
    }

    // Progress operations

    pub async fn upsert_progress(
        &self,
        user_id: i64,
        question_id: i64,
        status: AnswerStatus,
    ) -> Result<(), QuizError> {
        // INSERT OR REPLACE keeps at most one row per (user_id, question_id)
        // and lets the DEFAULT refresh the timestamp on replay.
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO user_progress (user_id, question_id, status)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(user_id)
        .bind(question_id)
        .bind(status.to_string())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    pub async fn list_progress(&self, user_id: i64) -> Result<Vec<ProgressEntry>, QuizError> {
        let rows: Vec<(i64, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT question_id, status, timestamp FROM user_progress
            WHERE user_id = ?1
            ORDER BY question_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows
            .into_iter()
            .map(|(question_id, status, timestamp)| ProgressEntry {
                user_id,
                question_id,
                status: parse_status(&status),
                timestamp,
            })
            .collect())
    }

    // Question operations

    pub async fn seed_questions(&self, questions: &[Question]) -> Result<(), QuizError> {
        for q in questions {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO questions (id, question, answer)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(q.id)
            .bind(&q.question)
            .bind(&q.answer)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        }

        Ok(())
    }
}

fn store_error(e: sqlx::Error) -> QuizError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            QuizError::Conflict(db.to_string())
        }
        _ => QuizError::Database(e.to_string()),
    }
}

fn parse_status(s: &str) -> AnswerStatus {
    match s {
        "correct" => AnswerStatus::Correct,
        _ => AnswerStatus::Incorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let db = Database::in_memory().await.unwrap();

        assert!(db.get_user_by_username("alice").await.unwrap().is_none());

        let id = db.create_user("alice").await.unwrap();
        let user = db.get_user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let db = Database::in_memory().await.unwrap();

        db.create_user("alice").await.unwrap();
        let err = db.create_user("alice").await.unwrap_err();
        assert!(matches!(err, QuizError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_upsert_progress_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let user_id = db.create_user("alice").await.unwrap();

        db.upsert_progress(user_id, 3, AnswerStatus::Correct)
            .await
            .unwrap();
        db.upsert_progress(user_id, 3, AnswerStatus::Correct)
            .await
            .unwrap();

        let entries = db.list_progress(user_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question_id, 3);
        assert_eq!(entries[0].status, AnswerStatus::Correct);
    }

    #[tokio::test]
    async fn test_upsert_progress_latest_status_wins() {
        let db = Database::in_memory().await.unwrap();
        let user_id = db.create_user("alice").await.unwrap();

        db.upsert_progress(user_id, 3, AnswerStatus::Correct)
            .await
            .unwrap();
        db.upsert_progress(user_id, 3, AnswerStatus::Incorrect)
            .await
            .unwrap();

        let entries = db.list_progress(user_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, AnswerStatus::Incorrect);
    }

    #[tokio::test]
    async fn test_progress_is_scoped_per_user() {
        let db = Database::in_memory().await.unwrap();
        let alice = db.create_user("alice").await.unwrap();
        let bob = db.create_user("bob").await.unwrap();

        db.upsert_progress(alice, 1, AnswerStatus::Correct)
            .await
            .unwrap();
        db.upsert_progress(bob, 2, AnswerStatus::Incorrect)
            .await
            .unwrap();

        let entries = db.list_progress(alice).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].question_id, 1);
    }

    #[tokio::test]
    async fn test_seed_questions_replaces_existing() {
        let db = Database::in_memory().await.unwrap();

        let questions = vec![Question {
            id: 1,
            question: "What is 2 + 2?".to_string(),
            answer: "4".to_string(),
            options: vec!["3".to_string(), "4".to_string()],
        }];
        db.seed_questions(&questions).await.unwrap();
        // Replay with updated text must not fail on the primary key.
        db.seed_questions(&questions).await.unwrap();
    }
}
