use async_trait::async_trait;

/// A voice offered by a synthesis engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// BCP-47 tag such as `en-GB`
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub locale: String,
    /// `None` lets the engine pick its default voice
    pub voice: Option<Voice>,
}

/// Text-to-speech engine
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn voices(&self) -> Vec<Voice>;

    /// Resolves when playback ends; dropping the future stops playback
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;
}

/// Speech-to-text engine capturing a single utterance
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// `Ok(None)` when the session ended without a transcript (silence)
    async fn recognize(&self, locale: &str) -> Result<Option<String>, SpeechError>;
}

/// Plays a remote pronunciation recording
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Resolves when the clip ends; dropping the future stops it
    async fn play(&self, url: &str) -> Result<(), SpeechError>;
}

/// A platform capability that may be missing
#[derive(Debug, Clone)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => Capability::Available(inner),
            None => Capability::Unavailable,
        }
    }
}

/// Which speech capabilities the session may rely on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub synthesis: bool,
    pub recognition: bool,
    /// Pronunciation recordings can be played
    pub audio: bool,
}

/// First voice sharing the locale's language prefix (`es` for `es-ES`)
pub fn select_voice(voices: &[Voice], locale: &str) -> Option<Voice> {
    let prefix = language_prefix(locale);
    voices
        .iter()
        .find(|v| language_prefix(&v.lang).eq_ignore_ascii_case(prefix))
        .cloned()
}

fn language_prefix(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech capability not supported")]
    Unsupported,

    #[error("Speech engine error: {0}")]
    Engine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
