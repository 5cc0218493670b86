use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_max_input_chars() -> usize {
    5000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Shown next to the character counter, not enforced
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl UiConfig {
    pub fn new() -> Self {
        Self {
            max_input_chars: env_or("MAX_INPUT_CHARS", default_max_input_chars()),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
        }
    }
}
