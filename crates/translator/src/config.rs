use serde::{Deserialize, Serialize};

/// Per-engine switches. Immutable for the lifetime of a translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Remember leaf translations for the duration of one `translate` call.
    pub memoize_leaves: bool,

    /// Drop repeated queries from the final list, keeping the first of each.
    pub deduplicate: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            memoize_leaves: true,
            deduplicate: true,
        }
    }
}
