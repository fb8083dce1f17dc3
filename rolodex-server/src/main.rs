//! Rolodex server binary: wires configuration, the MongoDB-backed store,
//! and the HTTP resource layer together.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use mongodb::Client;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolodex_core::{UserDirectory, seed::ReqresSeedSource, store::MongoUserStore};
use rolodex_server::{config::Config, routes, state::AppState};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "rolodex-server")]
#[command(about = "User directory service with a MongoDB-backed REST API")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, env = "ROLODEX_CONFIG")]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    // One client for the process lifetime, torn down explicitly below.
    let client = Client::with_uri_str(&config.database.url)
        .await
        .context("failed to connect to MongoDB")?;
    let store = MongoUserStore::new(&client, &config.database.name);
    let seed = ReqresSeedSource::new(config.seed.url.clone());
    let directory = UserDirectory::new(Arc::new(store), Arc::new(seed));

    let state = AppState {
        directory: Arc::new(directory),
        config: Arc::new(config.clone()),
    };

    let app = routes::api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind server address")?;
    info!(%addr, "rolodex listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    client.shutdown().await;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}
