use serde::{Deserialize, Serialize};

use crate::{env_opt, env_or};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base URL; the looked-up word is appended as the last path segment
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        Self {
            enabled: env_or("DICTIONARY_ENABLED", default_enabled()),
            api_url: env_opt("DICTIONARY_API_URL").unwrap_or_else(default_api_url),
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_api_url(),
        }
    }
}
