use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use searchbff::api;
use searchbff::bff::{self, client::BackendClient, service::BffService};
use searchbff::config::{Config, DEFAULT_BACKEND_PORT, DEFAULT_BFF_PORT};
use searchbff::db::{Database, MongoSearchRepo};
use searchbff::repository::{MemorySearchRepo, SearchRepository};
use searchbff::service::SearchService;

#[derive(Parser)]
#[command(name = "searchbff", about = "Search API and backend-for-frontend proxy")]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the core search API
    Backend {
        /// Serve the seeded in-memory store even if MONGO_URI is set
        #[arg(long)]
        memory: bool,
    },
    /// Run the backend-for-frontend proxy
    Bff {
        /// Core search API base URL (overrides BACKEND_URL)
        #[arg(long)]
        backend_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = Config::get()?;
    let host = cli.host.unwrap_or_else(|| config.host.clone());
    let cors = api::cors_layer(config.allowed_origin.as_deref())?;

    let (router, default_port) = match cli.command {
        Command::Backend { memory } => {
            let repo = backend_repository(config, memory).await?;
            let service = Arc::new(SearchService::new(repo));
            (api::create_router(service, cors), DEFAULT_BACKEND_PORT)
        }
        Command::Bff { backend_url } => {
            let backend_url = backend_url.unwrap_or_else(|| config.backend_url.clone());
            let client = BackendClient::new(&backend_url, config.upstream_timeout)?;
            tracing::info!("Forwarding searches to {}", client.base_url());
            let service = Arc::new(BffService::new(Arc::new(client)));
            (
                bff::create_router(service, cors, config.static_dir.as_deref()),
                DEFAULT_BFF_PORT,
            )
        }
    };

    let port = cli.port.or(config.port).unwrap_or(default_port);
    serve(router, &host, port).await
}

async fn backend_repository(
    config: &Config,
    force_memory: bool,
) -> Result<Arc<dyn SearchRepository>> {
    if !force_memory {
        if let Some(db) = Database::from_config(config).await? {
            return Ok(Arc::new(MongoSearchRepo::new(&db, &config.mongo_collection)));
        }
        tracing::warn!("MONGO_URI not set, serving the in-memory demo store");
    }
    Ok(Arc::new(MemorySearchRepo::seeded()))
}

async fn serve(router: Router, host: &str, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
