//! Wire types for the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ScanRecord;

/// Body of a successful `POST /classify`: the model's markdown, unchanged.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub result: String,
}

/// One `GET /history` element.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScanResponse {
    pub id: i64,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub result: String,
}

impl From<ScanRecord> for ScanResponse {
    fn from(record: ScanRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            created_at: record.created_at,
            result: record.result,
        }
    }
}
