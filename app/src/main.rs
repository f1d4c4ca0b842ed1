use anyhow::Context;

use tictactoe_live::{config::ServerConfig, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading configuration
    dotenvy::dotenv().ok();

    // RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tictactoe_live=info,tower_http=warn".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!("❌⭕ Tic-tac-toe server starting with {:?}", config);

    let state = AppState::new(&config);
    let session = state.session.clone();
    let app = routes::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("✅ Server listening on ws://{}/play", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    session.shutdown().await;
    tracing::info!("👋 Shutting down game server...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
