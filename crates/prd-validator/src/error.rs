#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("path escapes the documents root: {0}")]
    OutsideRoot(String),

    #[error("document too large: {path} has at least {size} bytes (limit {limit})")]
    TooLarge { path: String, size: u64, limit: u64 },

    #[error("invalid document {path}: {message}")]
    InvalidDocument { path: String, message: String },
}
