use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use studyforge_document::ChunkingConfig;
use studyforge_gateway::GatewayServer;
use studyforge_llm::groq::GroqProvider;
use studyforge_store::ChunkStore;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = resolve_config_path();
    let config = Config::load(&config_path)?;

    if config.llm.api_key.is_empty() {
        tracing::warn!("no API key configured, set STUDYFORGE_API_KEY");
    }

    let store = ChunkStore::open(PathBuf::from(&config.store.path)).await?;
    tracing::info!(
        path = %config.store.path,
        chunks = store.count(),
        "chunk store opened"
    );

    let provider = GroqProvider::new(
        config.llm.api_key,
        config.llm.base_url,
        config.llm.model.clone(),
    );
    tracing::info!(model = %config.llm.model, "LLM provider configured");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e:#}");
            return;
        }
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let server = GatewayServer::new(
        &config.server.bind,
        config.server.port,
        Arc::new(RwLock::new(store)),
        Arc::new(provider),
        shutdown_rx,
    )
    .with_auth(config.server.auth_token)
    .with_chunking(ChunkingConfig {
        chunk_size: config.chunking.chunk_size,
        overlap: config.chunking.overlap,
    });

    server.serve().await?;
    Ok(())
}

fn resolve_config_path() -> PathBuf {
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = args.windows(2).find(|w| w[0] == "--config").map(|w| &w[1]) {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("STUDYFORGE_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}
