use std::sync::Arc;

use dotenvy::dotenv;
use grammar_agent::{
    config::AgentConfig,
    model::{CorrectionModel, GeminiModel},
    server,
    service::CorrectionService,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let config = AgentConfig::from_env();
    if !config.has_api_key() {
        warn!("GOOGLE_API_KEY is not set; model calls will be rejected by the provider");
    }

    let model = GeminiModel::new(config.model.clone(), config.api_key.clone())
        .with_base_url(config.base_url.clone());
    info!(model = model.name(), timeout = ?config.model_timeout, "grammar agent starting");

    let service = CorrectionService::new(Arc::new(model)).with_timeout(config.model_timeout);
    server::serve(&config, service).await?;
    Ok(())
}
