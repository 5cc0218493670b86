use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env_opt;

const DEEPL_FREE_URL: &str = "https://api-free.deepl.com/v2/translate";
const DEEPL_PRO_URL: &str = "https://api.deepl.com/v2/translate";

fn default_api_url() -> String {
    DEEPL_FREE_URL.to_string()
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// DeepL authentication key, never logged
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let api_key = env_opt("DEEPL_API_KEY").unwrap_or_default();
        let api_url = env_opt("DEEPL_API_URL").unwrap_or_else(|| api_url_for_key(&api_key).to_string());

        Self {
            api_key,
            api_url,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
        }
    }
}

impl fmt::Debug for TranslatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslatorConfig")
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<unset>" })
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Free-tier keys carry a `:fx` suffix and only work against the free endpoint
pub fn api_url_for_key(api_key: &str) -> &'static str {
    if api_key.is_empty() || api_key.ends_with(":fx") {
        DEEPL_FREE_URL
    } else {
        DEEPL_PRO_URL
    }
}
