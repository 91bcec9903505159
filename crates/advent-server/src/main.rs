mod api;
mod cli;
mod middleware;

use std::sync::Arc;

use advent_feed::FeedService;
use advent_upstream::UpstreamClient;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};
use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(advent_core::load_app_config()?)?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = UpstreamClient::new(config.profile.clone(), &config.user_agent)?;
    let service = FeedService::new(client, config.profile.clone(), config.cache_ttl);
    let app = build_app(AppState::new(Arc::new(service)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        store = %config.profile.name,
        addr = %config.bind_addr,
        cache_ttl = ?config.cache_ttl,
        "starting advent calendar feed server"
    );
    tracing::info!(
        "feed available at http://localhost:{}/feed",
        config.bind_addr.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
