pub mod error;
pub mod extractor;
pub mod splitter;
pub mod types;

pub use error::DocumentError;
pub use extractor::extract;
pub use splitter::{ChunkingConfig, chunk_text};
pub use types::ExtractedDocument;

/// Default maximum upload size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
