//! User progress handler

use crate::handlers::ApiErrorBody;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use quiz_types::{ProgressSummary, QuizError};
use tracing::error;

pub async fn get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProgressSummary>, (StatusCode, Json<ApiErrorBody>)> {
    let user = state.directory.lookup(&username).await.map_err(|e| match e {
        QuizError::UserNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiErrorBody::new("User not found")),
        ),
        _ => {
            error!("Failed to look up user '{}': {}", username, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorBody::new("Failed to fetch progress")),
            )
        }
    })?;

    let summary = state.ledger.get_progress(user.id).await.map_err(|e| {
        error!("Failed to fetch progress for user {}: {}", user.id, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorBody::new("Failed to fetch progress")),
        )
    })?;

    Ok(Json(summary))
}
