use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{RwLock, watch};

use studyforge_document::ChunkingConfig;
use studyforge_llm::LlmProvider;
use studyforge_store::ChunkStore;

use crate::error::GatewayError;
use crate::router::build_router;

/// Shared state for every handler. The store sits behind an `RwLock` so an
/// upload holds the write guard across the whole reset+add sequence and
/// queries never observe a half-replaced document.
pub(crate) struct AppState<P> {
    pub store: Arc<RwLock<ChunkStore>>,
    pub provider: Arc<P>,
    pub chunking: ChunkingConfig,
    pub max_file_size: u64,
    pub started_at: Instant,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            provider: Arc::clone(&self.provider),
            chunking: self.chunking,
            max_file_size: self.max_file_size,
            started_at: self.started_at,
        }
    }
}

pub struct GatewayServer<P> {
    addr: SocketAddr,
    auth_token: Option<String>,
    max_file_size: u64,
    chunking: ChunkingConfig,
    store: Arc<RwLock<ChunkStore>>,
    provider: Arc<P>,
    shutdown_rx: watch::Receiver<bool>,
}

impl<P: LlmProvider + 'static> GatewayServer<P> {
    #[must_use]
    pub fn new(
        bind: &str,
        port: u16,
        store: Arc<RwLock<ChunkStore>>,
        provider: Arc<P>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let addr: SocketAddr = format!("{bind}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("invalid bind '{bind}': {e}, falling back to 127.0.0.1:{port}");
            SocketAddr::from(([127, 0, 0, 1], port))
        });

        Self {
            addr,
            auth_token: None,
            max_file_size: studyforge_document::DEFAULT_MAX_FILE_SIZE,
            chunking: ChunkingConfig::default(),
            store,
            provider,
            shutdown_rx,
        }
    }

    #[must_use]
    pub fn with_auth(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    #[must_use]
    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    /// Start the HTTP server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or encounters a fatal I/O error.
    pub async fn serve(self) -> Result<(), GatewayError> {
        let state = AppState {
            store: self.store,
            provider: self.provider,
            chunking: self.chunking,
            max_file_size: self.max_file_size,
            started_at: Instant::now(),
        };

        let router = build_router(state, self.auth_token, self.max_file_size);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| GatewayError::Bind(self.addr.to_string(), e))?;
        tracing::info!("listening on {}", self.addr);

        let mut shutdown_rx = self.shutdown_rx;
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                while !*shutdown_rx.borrow_and_update() {
                    if shutdown_rx.changed().await.is_err() {
                        std::future::pending::<()>().await;
                    }
                }
                tracing::info!("shutting down");
            })
            .await
            .map_err(|e| GatewayError::Server(format!("{e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyforge_llm::mock::MockProvider;

    async fn test_store() -> (Arc<RwLock<ChunkStore>>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = ChunkStore::open(dir.path().join("chunks.json"))
            .await
            .unwrap();
        (Arc::new(RwLock::new(store)), dir)
    }

    #[tokio::test]
    async fn server_builder_chain() {
        let (store, _dir) = test_store().await;
        let (_stx, srx) = watch::channel(false);
        let server = GatewayServer::new(
            "127.0.0.1",
            8090,
            store,
            Arc::new(MockProvider::default()),
            srx,
        )
        .with_auth(Some("token".into()))
        .with_max_file_size(512);

        assert_eq!(server.max_file_size, 512);
        assert!(server.auth_token.is_some());
    }

    #[tokio::test]
    async fn server_invalid_bind_fallback() {
        let (store, _dir) = test_store().await;
        let (_stx, srx) = watch::channel(false);
        let server = GatewayServer::new(
            "not_an_ip",
            9999,
            store,
            Arc::new(MockProvider::default()),
            srx,
        );
        assert_eq!(server.addr.port(), 9999);
    }
}
