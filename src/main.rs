use classifai_service::config::AppConfig;
use classifai_service::observability::init_tracing;
use classifai_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("classifai-service", "info");

    let config = AppConfig::load()?;

    let app = Application::build(config).await?;
    tracing::info!("ClassifAI sensitivity engine started");

    app.run_until_stopped().await?;

    Ok(())
}
