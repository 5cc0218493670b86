use serde::{Deserialize, Serialize};

use crate::dictionary::DictionaryEntry;
use crate::view::SessionView;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    TimerFired(TimerToken),
    TranslationFinished {
        generation: u64,
        result: Result<TranslationOutcome, String>,
    },
    DictionaryFinished {
        generation: u64,
        entry: Option<DictionaryEntry>,
    },
    PlaybackFinished {
        channel: PlaybackChannel,
        generation: u64,
    },
    Recognition(RecognitionEvent),
    ClipboardWritten {
        success: bool,
    },
    Render(Box<SessionView>),
    Notice(String),
    BackendReady,
    /// The session is gone; the front end can stop
    SessionEnded,
    Shutdown,
}

/// User intents coming from the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    InputChanged(String),
    Undo,
    Redo,
    TogglePicker(Side),
    SearchLanguage { side: Side, query: String },
    SelectLanguage { side: Side, code: String },
    /// Pointer pressed; `inside` names the picker region containing it, if any
    PointerDown { inside: Option<Side> },
    SwapLanguages,
    /// Text selected in the input (`Source`) or output (`Target`) pane
    SelectText { pane: Side, selection: String },
    TogglePlayback(PlaybackChannel),
    /// Play the recorded pronunciation of the dictionary word
    PlayPronunciation,
    VoiceInput,
    Copy,
    Like,
    Dislike,
    /// No more user input will arrive; close once nothing is pending
    EndOfInput,
    Close,
}

/// Which half of the translator: source language and input pane, or
/// target language and output pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Source => "source",
            Side::Target => "target",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackChannel {
    Output,
    Dictionary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Started,
    Transcript(String),
    Ended,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    History,
    Translation,
    CopiedReset,
}

/// Identity of one scheduled timer; a fired token that no longer matches the
/// pending one is stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub seq: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    /// `None` asks the provider to detect the source language
    pub source: Option<String>,
    pub target: String,
}

impl TranslationRequest {
    pub fn is_detect(&self) -> bool {
        self.source.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub text: String,
    pub detected_language: Option<String>,
}
