use std::sync::Arc;
use std::time::Duration;

use parla_config::Config;
use parla_core::speech::{
    AudioPlayer, Capabilities, Capability, SpeechRecognizer, SpeechSynthesizer, Voice,
};
use parla_dictionary::{DictionaryProvider, FreeDictionaryClient};
use parla_io::{CommandAudioPlayer, CommandRecognizer, CommandSynthesizer};
use parla_translator::{DeeplTranslator, Translator};

/// External collaborators the event loop drives on behalf of the session
#[derive(Clone)]
pub struct Services {
    pub translator: Arc<dyn Translator>,
    pub dictionary: Arc<dyn DictionaryProvider>,
    pub synthesizer: Capability<Arc<dyn SpeechSynthesizer>>,
    pub recognizer: Capability<Arc<dyn SpeechRecognizer>>,
    pub audio_player: Capability<Arc<dyn AudioPlayer>>,
}

impl Services {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_seconds);

        if !config.translator.has_api_key() {
            tracing::warn!("DEEPL_API_KEY is not set, translations will fail");
        }
        let translator = DeeplTranslator::new(
            config.translator.api_key.clone(),
            config.translator.api_url.clone(),
            timeout,
        )?;
        tracing::info!("Translator: {}", translator.metadata().name);

        let dictionary = FreeDictionaryClient::new(&config.dictionary.api_url, timeout)?;
        let metadata = dictionary.metadata();
        if config.dictionary.enabled {
            tracing::info!("Dictionary: {} ({})", metadata.name, metadata.language);
        } else {
            tracing::warn!("Dictionary {} disabled", metadata.name);
        }

        let voices: Vec<Voice> = config
            .speech
            .voices
            .iter()
            .map(|v| Voice {
                name: v.name.clone(),
                lang: v.lang.clone(),
            })
            .collect();
        let synthesizer = config
            .speech
            .synthesis_command
            .as_deref()
            .and_then(CommandSynthesizer::from_command_line)
            .map(|s| Arc::new(s.with_voices(voices)) as Arc<dyn SpeechSynthesizer>);
        let recognizer = config
            .speech
            .recognition_command
            .as_deref()
            .and_then(CommandRecognizer::from_command_line)
            .map(|r| Arc::new(r) as Arc<dyn SpeechRecognizer>);
        let audio_player = config
            .speech
            .audio_player_command
            .as_deref()
            .and_then(CommandAudioPlayer::from_command_line)
            .map(|p| Arc::new(p) as Arc<dyn AudioPlayer>);

        let services = Self {
            translator: Arc::new(translator),
            dictionary: Arc::new(dictionary),
            synthesizer: synthesizer.into(),
            recognizer: recognizer.into(),
            audio_player: audio_player.into(),
        };

        let capabilities = services.capabilities();
        tracing::info!(
            "Speech capabilities: synthesis={}, recognition={}, audio={}",
            capabilities.synthesis,
            capabilities.recognition,
            capabilities.audio
        );

        Ok(services)
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            synthesis: self.synthesizer.is_available(),
            recognition: self.recognizer.is_available(),
            audio: self.audio_player.is_available(),
        }
    }
}
