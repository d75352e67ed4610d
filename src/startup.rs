use crate::config::AppConfig;
use crate::handlers;
use crate::services::metrics::init_metrics;
use crate::services::providers::ModelGateway;
use crate::services::providers::gemini::{GeminiConfig, GeminiGateway};
use crate::services::{ClassificationPipeline, Database};
use anyhow::Context;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Uploads are buffered fully in memory; cap the body well above any
/// plausible PDF.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared application state, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: Database,
    pub pipeline: ClassificationPipeline,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    /// Build the application with the gateway implied by configuration:
    /// Gemini when a credential is present, none otherwise.
    pub async fn build(config: AppConfig) -> anyhow::Result<Self> {
        let gateway = config.google.api_key.as_ref().map(|api_key| {
            Arc::new(GeminiGateway::new(GeminiConfig {
                api_key: api_key.clone(),
                model: config.google.model.clone(),
            })) as Arc<dyn ModelGateway>
        });

        match &gateway {
            Some(_) => tracing::info!(
                model = %config.google.model,
                "Initialized Gemini model gateway"
            ),
            None => tracing::warn!(
                "GEMINI_API_KEY not set; classification requests will be rejected"
            ),
        }

        Self::with_gateway(config, gateway).await
    }

    /// Build with an explicit gateway. Tests inject a mock here.
    pub async fn with_gateway(
        config: AppConfig,
        gateway: Option<Arc<dyn ModelGateway>>,
    ) -> anyhow::Result<Self> {
        init_metrics();

        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;
        db.run_migrations().await?;

        let pipeline = ClassificationPipeline::new(gateway);

        let state = AppState {
            config: config.clone(),
            db,
            pipeline,
        };

        let app = Router::new()
            .route("/", get(handlers::home))
            .route("/classify", post(handlers::classify_document))
            .route("/history", get(handlers::scan_history))
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind TCP listener to {}", addr))?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
