//! Error types for the bf-app service layer.

/// Application error type that wraps errors from the lower crates and gives
/// the CLI a single error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Draft error: {0}")]
    Draft(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Metric derivation failed: {0}")]
    Derive(String),

    #[error("Submission rejected: {count} field error(s)")]
    Rejected { count: usize },

    #[error("Block sink failed: {message}")]
    Sink { message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<bf_block::BlockError> for AppError {
    fn from(err: bf_block::BlockError) -> Self {
        AppError::Draft(err.to_string())
    }
}

impl From<bf_block::FieldParseError> for AppError {
    fn from(err: bf_block::FieldParseError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<bf_block::DeriveError> for AppError {
    fn from(err: bf_block::DeriveError) -> Self {
        AppError::Derive(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
