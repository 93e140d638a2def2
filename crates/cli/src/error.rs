use connectors::ConnectorError;
use filter_syntax::SyntaxError;
use thiserror::Error;
use translator::TranslateError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse the configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid filter: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Failed to translate the filter: {0}")]
    Translate(#[from] TranslateError),

    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl CliError {
    /// Message for the terminal; syntax errors point at the offending column.
    pub fn report(&self) -> String {
        match self {
            CliError::Syntax(err) => err.format_error(),
            other => other.to_string(),
        }
    }
}
