use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::EnvFilter;

use snippetbox::cli::Cli;
use snippetbox::config::AppConfig;
use snippetbox::database::{DatabaseManager, PgSnippetStore, PgUserStore};
use snippetbox::middleware::session::{spawn_expired_deletion, EXPIRED_DELETION_PERIOD};
use snippetbox::routes;
use snippetbox::state::AppState;
use snippetbox::templates::TemplateCache;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL, SESSION_SECRET etc. apply to cargo run
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_cli_overrides(cli.addr, cli.dsn);
    tracing::info!("Starting Snippetbox in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;

    let templates = TemplateCache::new(&config.ui.html_dir())
        .with_context(|| format!("loading templates from {}", config.ui.html_dir().display()))?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("creating session table")?;
    let deletion_task = spawn_expired_deletion(session_store.clone(), EXPIRED_DELETION_PERIOD);

    let bind_addr = config.server.bind_addr();
    let state = AppState::new(
        config,
        Arc::new(PgSnippetStore::new(pool.clone())),
        Arc::new(PgUserStore::new(pool.clone())),
        templates,
    );
    let app = routes::app(state, session_store);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Starting server on {}", bind_addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    deletion_task.abort();
    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
