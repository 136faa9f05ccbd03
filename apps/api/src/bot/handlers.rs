use axum::{extract::State, http::StatusCode};
use bytes::Bytes;

use crate::bot::activity::Activity;
use crate::bot::process_turn;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/messages
///
/// Bot Framework webhook. Replies are delivered out of band through the connector,
/// so a processed turn answers 200 with no body.
pub async fn handle_messages(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let activity: Activity = serde_json::from_slice(&body)
        .map_err(|e| AppError::Bot(format!("Invalid or missing activity: {e}")))?;

    process_turn(state.bot.as_ref(), &activity)
        .await
        .map_err(|e| AppError::Bot(e.to_string()))?;

    Ok(StatusCode::OK)
}
