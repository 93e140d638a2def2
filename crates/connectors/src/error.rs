use thiserror::Error;
use translator::TranslateError;

#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The requested SQL dialect is not one of the bundled ones.
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// Records for the in-memory store could not be decoded.
    #[error("Invalid records: {0}")]
    Records(#[from] serde_json::Error),

    #[error("Translation error: {0}")]
    Translate(#[from] TranslateError),
}
