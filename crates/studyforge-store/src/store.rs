use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One stored window of document text. Immutable once added; the whole
/// collection is discarded on the next upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Positional retrieval result. `distances` is a 0.0 placeholder per entry:
/// this store does no similarity computation, it returns chunks in insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    pub documents: Vec<String>,
    pub metadatas: Vec<Metadata>,
    pub distances: Vec<f32>,
}

/// Chunk collection for the currently loaded document, backed by a flat JSON
/// file that is rewritten wholesale on every mutation.
///
/// Holds chunks from at most one document at a time: callers clear the store
/// with [`ChunkStore::reset`] before loading a new document. The full
/// document text lives alongside the collection and shares its lifetime; it
/// is kept in memory only, the file holds just the chunk records.
///
/// The store itself is not synchronized — the owning service wraps it in a
/// lock and holds the write guard across multi-step mutations.
#[derive(Debug)]
pub struct ChunkStore {
    path: PathBuf,
    chunks: Vec<Chunk>,
    full_text: String,
}

impl ChunkStore {
    /// Open a store backed by `path`, loading any previously persisted
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or an
    /// existing file cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let chunks = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        if !chunks.is_empty() {
            tracing::info!(count = chunks.len(), path = %path.display(), "loaded persisted chunks");
        }

        Ok(Self {
            path,
            chunks,
            full_text: String::new(),
        })
    }

    /// Discard all chunks and the cached full text. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the emptied collection cannot be persisted.
    pub async fn reset(&mut self) -> Result<(), StoreError> {
        self.chunks.clear();
        self.full_text.clear();
        self.persist().await
    }

    /// Append one chunk per text, returning the number added.
    ///
    /// Ids default to `doc_{index}` with the index restarting from 0 within
    /// each call — callers needing globally unique ids must supply their own.
    /// Metadata defaults to an empty map per chunk.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ArityMismatch` when `metadatas` or `ids` is
    /// present with a length different from `texts`, or an IO/serialization
    /// error if persistence fails.
    pub async fn add(
        &mut self,
        texts: Vec<String>,
        metadatas: Option<Vec<Metadata>>,
        ids: Option<Vec<String>>,
    ) -> Result<usize, StoreError> {
        let expected = texts.len();
        if let Some(ref m) = metadatas
            && m.len() != expected
        {
            return Err(StoreError::ArityMismatch {
                field: "metadatas",
                expected,
                actual: m.len(),
            });
        }
        if let Some(ref i) = ids
            && i.len() != expected
        {
            return Err(StoreError::ArityMismatch {
                field: "ids",
                expected,
                actual: i.len(),
            });
        }

        let ids = ids.unwrap_or_else(|| (0..expected).map(|i| format!("doc_{i}")).collect());
        let metadatas = metadatas.unwrap_or_else(|| vec![Metadata::new(); expected]);

        for ((text, id), metadata) in texts.into_iter().zip(ids).zip(metadatas) {
            self.chunks.push(Chunk { id, text, metadata });
        }

        self.persist().await?;
        Ok(expected)
    }

    /// Return the first `n` chunks in insertion order.
    ///
    /// This is positional retrieval, not search: there is no query and no
    /// ranking, and the reported distances are always 0.0.
    #[must_use]
    pub fn fetch_first(&self, n: usize) -> Retrieval {
        let taken = &self.chunks[..n.min(self.chunks.len())];
        Retrieval {
            documents: taken.iter().map(|c| c.text.clone()).collect(),
            metadatas: taken.iter().map(|c| c.metadata.clone()).collect(),
            distances: vec![0.0; taken.len()],
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.chunks.len()
    }

    pub fn set_full_text(&mut self, text: String) {
        self.full_text = text;
    }

    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the backing file with the full current collection.
    async fn persist(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&self.chunks)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}
