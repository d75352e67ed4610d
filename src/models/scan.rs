//! Persisted classification outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One past classification. Append-only: rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScanRecord {
    pub id: i64,
    pub filename: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}
