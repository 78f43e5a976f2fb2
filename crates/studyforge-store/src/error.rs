#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file corrupt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} length {actual} does not match texts length {expected}")]
    ArityMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}
