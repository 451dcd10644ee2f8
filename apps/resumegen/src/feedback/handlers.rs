use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::{AppError, AppJson};
use crate::feedback::{FeedbackForm, SUCCESS_MESSAGE};
use crate::state::AppState;

#[derive(Serialize)]
pub struct FeedbackResponse {
    pub message: &'static str,
}

/// POST /api/v1/feedback
/// On failure the caller keeps its form values; nothing is stored here.
pub async fn handle_feedback(
    State(state): State<AppState>,
    AppJson(mut form): AppJson<FeedbackForm>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let _guard = state
        .feedback_send
        .try_begin()
        .ok_or(AppError::Busy("feedback submission"))?;
    form.submit(state.feedback.as_ref()).await?;
    Ok(Json(FeedbackResponse {
        message: SUCCESS_MESSAGE,
    }))
}
