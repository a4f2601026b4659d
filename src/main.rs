use std::sync::Arc;

use nova_relay::config::RelayConfig;
use nova_relay::conversation::{ChatService, SessionStore, PERSONA};
use nova_relay::llm::GroqProvider;
use nova_relay::logging;
use nova_relay::server;
use nova_relay::sheets::{ServiceAccountKey, SheetsAuth, SheetsLogger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging()?;

    tracing::info!("=== NOVA Chat Relay Starting ===");

    let config = RelayConfig::from_env()?;

    let provider = GroqProvider::new(
        &config.groq_api_key,
        &config.model,
        config.upstream_timeout,
    )?;

    let key = ServiceAccountKey::from_file(&config.service_account_file)?;
    let logger = SheetsLogger::new(
        SheetsAuth::new(key),
        &config.spreadsheet_id,
        config.upstream_timeout,
    )?;

    // Fail fast on unusable spreadsheet credentials
    logger.warm_up().await?;

    let mut store = SessionStore::new(PERSONA);
    if let Some(capacity) = config.session_capacity {
        tracing::info!("Session store capacity: {}", capacity);
        store = store.with_capacity(capacity);
    }

    let chat = Arc::new(ChatService::new(store, Arc::new(provider), Arc::new(logger)));
    let app = server::router(chat);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    tracing::info!("=== NOVA Chat Relay Shutting Down ===");

    Ok(())
}
