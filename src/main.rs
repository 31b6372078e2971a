use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catdog_api::cli::Cli;
use catdog_api::views::ViewRenderer;
use catdog_api::{app, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catdog_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.apply(catdog_api::config::config().clone());
    tracing::info!("Starting catdog-api in {:?} mode", config.environment);

    let store = database::connect(&config.database)
        .await
        .context("failed to connect to store")?;
    let views = ViewRenderer::new(config.views.template_dir.as_deref())
        .context("failed to load view templates")?;

    let app = app(AppState::new(store, views), &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("catdog-api listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
