//! Login/registration handler
//!
//! Usernames are unauthenticated identifiers: logging in with a new
//! username registers it.

use crate::handlers::ApiMessage;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use quiz_types::QuizError;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    success: bool,
    message: String,
    username: String,
}

pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ApiMessage>)> {
    let Some(Json(req)) = payload else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiMessage::failure("Username is required.")),
        ));
    };

    info!("Login attempt for: {}", req.username);

    let (user, created) = state
        .directory
        .resolve_or_create(&req.username)
        .await
        .map_err(|e| {
            error!("Login error for '{}': {}", req.username, e);
            match e {
                QuizError::Validation(message) => {
                    (StatusCode::BAD_REQUEST, Json(ApiMessage::failure(message)))
                }
                QuizError::Conflict(_) => (
                    StatusCode::CONFLICT,
                    Json(ApiMessage::failure(
                        "Username might already be taken (concurrent request?).",
                    )),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiMessage::failure("A database error occurred.")),
                ),
            }
        })?;

    let message = if created {
        "Registered and logged in successfully."
    } else {
        "Logged in successfully."
    };
    info!("Login successful for: {} (id={})", user.username, user.id);

    Ok(Json(LoginResponse {
        success: true,
        message: message.to_string(),
        username: user.username,
    }))
}
