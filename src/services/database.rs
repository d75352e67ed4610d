//! Database service: connection pool and scan-record operations.

use crate::error::ApiError;
use crate::models::ScanRecord;
use crate::services::metrics;
use anyhow::Context;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "classifai-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> anyhow::Result<Self> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to SQLite"
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        info!("Database connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Migration failed")?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Append one classification outcome. The timestamp is captured here,
    /// never client-supplied.
    #[instrument(skip(self, result), fields(filename = %filename))]
    pub async fn record_scan(&self, filename: &str, result: &str) -> Result<ScanRecord, ApiError> {
        let started = Instant::now();

        let record = sqlx::query_as::<_, ScanRecord>(
            r#"
            INSERT INTO scan_records (filename, result, created_at)
            VALUES (?1, ?2, ?3)
            RETURNING id, filename, result, created_at
            "#,
        )
        .bind(filename)
        .bind(result)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        metrics::record_db_operation("record_scan", started.elapsed().as_secs_f64());

        info!(scan_id = record.id, "Scan recorded");

        Ok(record)
    }

    /// The most recently created records, newest first, at most `limit`.
    #[instrument(skip(self))]
    pub async fn recent_scans(&self, limit: i64) -> Result<Vec<ScanRecord>, ApiError> {
        let started = Instant::now();

        // id breaks equal-timestamp ties so "newest first" stays strict.
        let records = sqlx::query_as::<_, ScanRecord>(
            r#"
            SELECT id, filename, result, created_at
            FROM scan_records
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        metrics::record_db_operation("recent_scans", started.elapsed().as_secs_f64());

        Ok(records)
    }
}
