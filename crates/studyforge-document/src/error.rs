#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("invalid chunking parameters: chunk_size={chunk_size}, overlap={overlap}")]
    InvalidChunking { chunk_size: usize, overlap: usize },
}
