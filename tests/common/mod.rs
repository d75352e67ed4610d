use classifai_service::config::{AppConfig, CommonConfig, DatabaseConfig, GoogleConfig};
use classifai_service::services::providers::ModelGateway;
use classifai_service::startup::Application;
use std::sync::Arc;

pub struct TestApp {
    pub port: u16,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

/// Spawn the application on a random port against a private in-memory store.
///
/// `gateway: None` is the "API credential missing" deployment.
pub async fn spawn_app(gateway: Option<Arc<dyn ModelGateway>>) -> TestApp {
    let config = test_config();

    let app = Application::with_gateway(config, gateway)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(app.run_until_stopped());

    TestApp {
        port,
        client: reqwest::Client::new(),
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        common: CommonConfig { port: 0 },
        database: DatabaseConfig {
            // One connection keeps the whole suite on the same in-memory DB.
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        google: GoogleConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
        },
    }
}

/// Multipart form with a single `file` part, as the frontend submits it.
pub fn upload_form(filename: &str, mime_type: &str, data: Vec<u8>) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .unwrap(),
    )
}
