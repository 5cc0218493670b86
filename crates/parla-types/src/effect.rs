use std::time::Duration;

use crate::types::{PlaybackChannel, TimerKind, TimerToken, TranslationRequest};

/// Side effects requested by the session, executed by the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Schedule {
        token: TimerToken,
        delay: Duration,
    },
    Cancel(TimerKind),
    Translate {
        generation: u64,
        request: TranslationRequest,
    },
    LookupWord {
        generation: u64,
        word: String,
    },
    Speak {
        channel: PlaybackChannel,
        generation: u64,
        text: String,
        locale: String,
    },
    StopSpeaking(PlaybackChannel),
    /// Play a pronunciation recording by URL
    PlayAudio(String),
    StartRecognition {
        locale: String,
    },
    WriteClipboard(String),
    Notify(String),
    /// Release every pending timer and in-flight task
    Teardown,
}
