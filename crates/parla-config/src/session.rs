use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{env_opt, env_or};

fn default_debounce_ms() -> u64 {
    300
}

fn default_copied_reset_ms() -> u64 {
    3000
}

fn default_history_limit() -> usize {
    100
}

fn default_source() -> String {
    "auto".to_string()
}

fn default_target() -> String {
    "EN".to_string()
}

/// Timing and initial state of the translator session
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    #[serde(default = "default_debounce_ms")]
    pub translate_debounce_ms: u64,
    #[serde(default = "default_debounce_ms")]
    pub history_debounce_ms: u64,
    /// How long the "copied" marker stays on after a clipboard write
    #[serde(default = "default_copied_reset_ms")]
    pub copied_reset_ms: u64,
    /// Maximum number of snapshots kept for undo/redo
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_source")]
    pub default_source: String,
    #[serde(default = "default_target")]
    pub default_target: String,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            translate_debounce_ms: env_or("TRANSLATE_DEBOUNCE_MS", default_debounce_ms()),
            history_debounce_ms: env_or("HISTORY_DEBOUNCE_MS", default_debounce_ms()),
            copied_reset_ms: env_or("COPIED_RESET_MS", default_copied_reset_ms()),
            history_limit: env_or("HISTORY_LIMIT", default_history_limit()),
            default_source: env_opt("DEFAULT_SOURCE_LANG").unwrap_or_else(default_source),
            default_target: env_opt("DEFAULT_TARGET_LANG").unwrap_or_else(default_target),
        }
    }

    pub fn translate_debounce(&self) -> Duration {
        Duration::from_millis(self.translate_debounce_ms)
    }

    pub fn history_debounce(&self) -> Duration {
        Duration::from_millis(self.history_debounce_ms)
    }

    pub fn copied_reset(&self) -> Duration {
        Duration::from_millis(self.copied_reset_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            translate_debounce_ms: default_debounce_ms(),
            history_debounce_ms: default_debounce_ms(),
            copied_reset_ms: default_copied_reset_ms(),
            history_limit: default_history_limit(),
            default_source: default_source(),
            default_target: default_target(),
        }
    }
}
