use std::sync::Arc;

use anyhow::Context;
use solana_error_translator::config::Config;
use solana_error_translator::rpc::client::RpcFetcher;
use solana_error_translator::server::{self, AppState};
use solana_error_translator::ErrorCatalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solana_error_translator=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("reading .env"),
    }

    let config = Config::from_env().context("loading configuration")?;
    let fetcher = RpcFetcher::new(&config.rpc_url, config.rpc_timeout())?;
    tracing::info!(
        rpc_host = fetcher.host(),
        errors_path = %config.errors_path.display(),
        bind_addr = %config.bind_addr,
        "configuration loaded"
    );

    let catalog = ErrorCatalog::load(&config.errors_path)
        .with_context(|| format!("loading error catalog from {}", config.errors_path.display()))?;
    tracing::info!(
        programs = catalog.program_count(),
        errors = catalog.error_count(),
        "error catalog loaded"
    );

    let cors = server::cors_layer(&config.cors_origins())?;
    let app = server::router(AppState::new(Arc::new(catalog), fetcher)).layer(cors);

    server::run(config.bind_addr, app).await?;
    Ok(())
}
