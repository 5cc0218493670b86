use serde::{Deserialize, Serialize};

use crate::env_opt;

/// External programs backing speech playback and capture.
///
/// Each command is split on whitespace; the first word is the program and the
/// rest are leading arguments. Leaving a command unset makes the matching
/// capability unavailable.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    /// Receives an optional `-v <voice>`, then `--` and the text, e.g. `espeak-ng`
    pub synthesis_command: Option<String>,
    /// Voices the synthesis engine offers, matched against the text's locale
    pub voices: Vec<VoiceConfig>,
    /// Receives `--lang <locale>` and prints one transcript line on stdout
    pub recognition_command: Option<String>,
    /// Receives the URL of a pronunciation recording, e.g. `mpv --no-video`
    pub audio_player_command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub name: String,
    /// BCP-47 tag such as `es-ES`
    pub lang: String,
}

impl SpeechConfig {
    pub fn new() -> Self {
        Self {
            synthesis_command: env_opt("TTS_COMMAND"),
            voices: env_opt("TTS_VOICES")
                .map(|list| parse_voices(&list))
                .unwrap_or_default(),
            recognition_command: env_opt("STT_COMMAND"),
            audio_player_command: env_opt("AUDIO_PLAYER_COMMAND"),
        }
    }
}

/// Parse `name=lang` pairs separated by commas, skipping malformed pairs
pub fn parse_voices(list: &str) -> Vec<VoiceConfig> {
    list.split(',')
        .filter_map(|pair| {
            let (name, lang) = pair.split_once('=')?;
            let (name, lang) = (name.trim(), lang.trim());
            if name.is_empty() || lang.is_empty() {
                tracing::warn!("Ignoring malformed voice entry '{}'", pair.trim());
                return None;
            }
            Some(VoiceConfig {
                name: name.to_string(),
                lang: lang.to_string(),
            })
        })
        .collect()
}
