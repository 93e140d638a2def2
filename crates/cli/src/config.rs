use crate::error::CliError;
use connectors::Capabilities;
use serde::Deserialize;
use translator::TranslatorConfig;

/// Settings file for the `translate` command.
///
/// ```toml
/// [translator]
/// deduplicate = false
///
/// [capabilities]
/// operators = ["eq", "sw"]
/// or = false
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub capabilities: Capabilities,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(contents)?)
    }
}
