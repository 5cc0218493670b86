use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::session::SessionConfig;
use self::speech::SpeechConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod dictionary;
pub mod session;
pub mod speech;
pub mod translator;
pub mod ui;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub dictionary: DictionaryConfig,
    pub session: SessionConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,

    /// Timeout applied to every provider request
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Build the config from the process environment
    pub fn new() -> Self {
        let request_timeout_seconds = env_or("REQUEST_TIMEOUT_SECONDS", 10);

        Config {
            translator: TranslatorConfig::new(),
            dictionary: DictionaryConfig::new(),
            session: SessionConfig::new(),
            speech: SpeechConfig::new(),
            ui: UiConfig::new(),

            request_timeout_seconds,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            dictionary: DictionaryConfig::default(),
            session: SessionConfig::default(),
            speech: SpeechConfig::default(),
            ui: UiConfig::default(),

            request_timeout_seconds: 10,
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset or invalid
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Non-empty environment variable
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
