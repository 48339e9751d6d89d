use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use prospect_reply::core::config::load_config;
use prospect_reply::core::logging;
use prospect_reply::server;
use prospect_reply::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Failed to load .env file: {}", err);
        }
    }

    let config = load_config().context("Failed to load configuration")?;
    logging::init(&config.logging);
    tracing::debug!("Configuration: {:?}", config);

    let bind_addr = config.server.bind_addr();
    let state = AppState::initialize(config)
        .await
        .context("Failed to initialize service")?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;
    tracing::info!("Listening on {}", addr);

    let app: Router = server::router::router(state);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
