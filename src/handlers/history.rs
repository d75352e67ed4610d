use crate::dtos::ScanResponse;
use crate::error::ApiError;
use crate::startup::AppState;
use axum::{Json, extract::State};

/// Fixed cap on the history endpoint. No pagination cursor is exposed.
const HISTORY_LIMIT: i64 = 20;

pub async fn scan_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScanResponse>>, ApiError> {
    let records = state.db.recent_scans(HISTORY_LIMIT).await?;

    Ok(Json(records.into_iter().map(ScanResponse::from).collect()))
}
