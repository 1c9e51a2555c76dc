use mentor_portal::{config, database::DatabaseManager, handlers::AppState, server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, DATABASE_BACKEND, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!(
        "Starting mentor portal in {:?} mode ({:?} store)",
        config.environment,
        config.database.backend
    );

    let store = server::build_store(config).await?;
    let state = AppState::new(store);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    let result = server::serve(listener, state, config).await;
    DatabaseManager::close().await;
    result?;
    Ok(())
}
