use crate::dtos::ClassifyResponse;
use crate::error::ApiError;
use crate::services::metrics;
use crate::services::pipeline::Upload;
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Multipart, State},
};

pub async fn classify_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let upload = read_upload(&mut multipart).await?;

    tracing::info!(
        filename = %upload.filename,
        size = upload.data.len(),
        "Classification requested"
    );

    let result = classify_and_record(&state, &upload).await;

    match &result {
        Ok(_) => metrics::record_classification("ok"),
        Err(e) => metrics::record_classification(e.kind()),
    }

    Ok(Json(ClassifyResponse { result: result? }))
}

/// The response is not built until both the model call and the store write
/// finished; a failed write fails the whole request, and no partial row
/// survives a failed classification.
async fn classify_and_record(state: &AppState, upload: &Upload) -> Result<String, ApiError> {
    let text = state.pipeline.classify(upload).await?;

    let record = state.db.record_scan(&upload.filename, &text).await?;
    tracing::info!(
        scan_id = record.id,
        filename = %record.filename,
        "Classification recorded"
    );

    Ok(text)
}

/// Pull the `file` part out of the form and buffer it fully.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("unnamed").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("failed to read upload: {}", e)))?
            .to_vec();

        return Ok(Upload {
            filename,
            content_type,
            data,
        });
    }

    Err(ApiError::Validation(
        "multipart field 'file' missing".to_string(),
    ))
}
