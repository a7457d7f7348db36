//! Static question catalog
//!
//! Questions live in a JSON file on disk and are read per request, so
//! catalog edits show up without a restart. A missing or malformed file
//! fails the request, not the process.

use quiz_types::{Question, QuizError, Result};
use std::path::PathBuf;
use tracing::warn;

pub struct QuestionCatalog {
    path: PathBuf,
}

impl QuestionCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<Vec<Question>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    "Cannot read question catalog {}: {}",
                    self.path.display(),
                    e
                );
                return Err(QuizError::Catalog(
                    "Questions data file not found.".to_string(),
                ));
            }
        };

        let questions: Vec<Question> = serde_json::from_slice(&bytes).map_err(|e| {
            warn!(
                "Question catalog {} is malformed: {}",
                self.path.display(),
                e
            );
            QuizError::Catalog("Invalid questions data format.".to_string())
        })?;

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_catalog(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "quiz-catalog-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let path = temp_catalog(
            "ok",
            r#"[
                {"id": 1, "question": "What is 2 + 2?", "answer": "4", "options": ["3", "4", "5"]},
                {"id": 2, "question": "Capital of France?", "answer": "Paris", "options": ["Paris", "Rome"]}
            ]"#,
        );

        let catalog = QuestionCatalog::new(&path);
        let questions = catalog.load().await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[1].answer, "Paris");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_catalog_error() {
        let catalog = QuestionCatalog::new("/nonexistent/questions.json");
        let err = catalog.load().await.unwrap_err();
        assert!(matches!(err, QuizError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_catalog_error() {
        let path = temp_catalog("bad", "{not json");

        let catalog = QuestionCatalog::new(&path);
        let err = catalog.load().await.unwrap_err();
        assert!(matches!(err, QuizError::Catalog(_)));

        std::fs::remove_file(path).ok();
    }
}
