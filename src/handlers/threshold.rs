use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::AppError;
use crate::models::{ThresholdAck, ThresholdRequest};
use crate::AppState;

/// POST /threshold - Queue a one-off threshold check and return its callback URLs
pub async fn submit_threshold(
    State(state): State<AppState>,
    payload: Result<Json<ThresholdRequest>, JsonRejection>,
) -> Result<Json<ThresholdAck>, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::BadRequest(format!(
            "Did not recognize request, please consult docs: {}",
            e.body_text()
        ))
    })?;

    let ack = state.thresholds.submit(request)?;
    Ok(Json(ack))
}
