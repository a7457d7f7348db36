//! Question catalog handler

use crate::handlers::ApiErrorBody;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use quiz_types::{Question, QuizError};
use tracing::error;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<Question>>, (StatusCode, Json<ApiErrorBody>)> {
    match state.catalog.load().await {
        Ok(questions) => Ok(Json(questions)),
        Err(e) => {
            error!("Failed to load question catalog: {}", e);
            let message = match e {
                QuizError::Catalog(message) => message,
                _ => "Failed to load questions.".to_string(),
            };
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorBody::new(message)),
            ))
        }
    }
}
