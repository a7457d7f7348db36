//! Answer recording handler

use crate::handlers::ApiMessage;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use quiz_types::QuizError;
use serde::Deserialize;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    username: String,
    question_id: i64,
    is_correct: bool,
}

pub async fn record(
    State(state): State<AppState>,
    payload: Option<Json<AnswerRequest>>,
) -> Result<Json<ApiMessage>, (StatusCode, Json<ApiMessage>)> {
    // Typed schema: a body missing any required field never reaches the store.
    let Some(Json(req)) = payload else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiMessage::failure("Missing required fields.")),
        ));
    };

    let user = state
        .directory
        .lookup(&req.username)
        .await
        .map_err(|e| match e {
            QuizError::UserNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ApiMessage::failure("User not found.")),
            ),
            _ => {
                error!("Failed to look up user '{}': {}", req.username, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiMessage::failure("Database error recording answer.")),
                )
            }
        })?;

    state
        .ledger
        .record(user.id, req.question_id, req.is_correct)
        .await
        .map_err(|e| {
            error!(
                "Failed to record answer for user {}, question {}: {}",
                user.id, req.question_id, e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiMessage::failure("Database error recording answer.")),
            )
        })?;

    info!(
        "Recorded answer for user {}, question {}: correct={}",
        user.id, req.question_id, req.is_correct
    );

    Ok(Json(ApiMessage::success("Answer recorded.")))
}
