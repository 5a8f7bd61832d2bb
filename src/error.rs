use thiserror::Error;

/// Failures of a single translation request
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("translation service error {status}: {details}")]
    Api { status: String, details: String },

    #[error("invalid response format: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to extract translation from response")]
    MissingTranslation,

    #[error("unknown translation provider: {0}")]
    Unsupported(String),

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("favorites file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode favorites: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no translation to save")]
    NothingToSave,
}
