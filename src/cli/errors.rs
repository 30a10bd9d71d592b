use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Delimiter is not valid UTF-8: {value}")]
    InvalidDelimiter { value: String },

    #[error(transparent)]
    Library(#[from] polyglot_eol::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
