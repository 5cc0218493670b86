use std::collections::HashMap;
use std::time::Duration;

use parla_config::Config;
use parla_types::{
    AppEvent, DictionaryEntry, DictionaryPanel, Effect, LanguageView, PickerOption, PickerView,
    PlaybackChannel, RecognitionEvent, SessionView, Side, TimerKind, TimerToken, TranslationOutcome,
    TranslationRequest, UiEvent,
};

use crate::history::InputHistory;
use crate::language::{self, ENGLISH};
use crate::preprocess::{Preprocessor, SelectionPreprocessor};
use crate::speech::Capabilities;

pub const TRANSLATION_ERROR: &str = "Error: Could not translate text";
pub const RECOGNITION_UNSUPPORTED: &str = "Voice recognition is not supported on this system.";
pub const SYNTHESIS_UNSUPPORTED: &str = "Speech playback is not supported on this system.";
pub const AUDIO_UNSUPPORTED: &str = "Audio playback is not configured on this system.";
pub const NO_PRONUNCIATION_AUDIO: &str = "No pronunciation recording for this word.";
pub const DICTIONARY_ENGLISH_ONLY: &str = "The dictionary only works with English words.";
pub const DICTIONARY_UNSUPPORTED: &str =
    "The dictionary does not work with this language, it will be added soon.";

/// Timing and limits the session runs with
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub translate_debounce: Duration,
    pub history_debounce: Duration,
    pub copied_reset: Duration,
    pub history_limit: usize,
    pub max_input_chars: usize,
    pub dictionary_enabled: bool,
    pub default_source: String,
    pub default_target: String,
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            translate_debounce: config.session.translate_debounce(),
            history_debounce: config.session.history_debounce(),
            copied_reset: config.session.copied_reset(),
            history_limit: config.session.history_limit,
            max_input_chars: config.ui.max_input_chars,
            dictionary_enabled: config.dictionary.enabled,
            default_source: config.session.default_source.clone(),
            default_target: config.session.default_target.clone(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Playback {
    playing: bool,
    generation: u64,
}

/// All state of one translator session.
///
/// Every mutation goes through [`Session::handle`], which returns the effects
/// the runtime has to carry out. The session never performs I/O itself.
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    capabilities: Capabilities,

    source: String,
    target: String,
    input: String,
    output: String,
    loading: bool,

    history: InputHistory,
    pending_snapshot: Option<String>,

    open_picker: Option<Side>,
    source_query: String,
    target_query: String,

    selected_word: Option<String>,
    dictionary: Option<DictionaryEntry>,

    liked: bool,
    disliked: bool,
    copied: bool,
    listening: bool,
    output_playback: Playback,
    dictionary_playback: Playback,

    timer_seq: u64,
    pending_timers: HashMap<TimerKind, u64>,
    translation_generation: u64,
    detect_in_flight: bool,
    lookup_generation: u64,

    /// Input has ended; tear down once nothing is pending
    close_when_settled: bool,
    torn_down: bool,
}

impl Session {
    pub fn new(settings: SessionSettings, capabilities: Capabilities) -> Self {
        let source = match language::find(&settings.default_source) {
            Some(lang) => lang.code.to_string(),
            None => {
                tracing::warn!(
                    "Unknown default source language '{}', using auto-detect",
                    settings.default_source
                );
                language::AUTO_DETECT.to_string()
            }
        };

        let target = match language::find(&settings.default_target) {
            Some(lang) if !language::is_auto(lang.code) => lang.code.to_string(),
            _ => {
                tracing::warn!(
                    "Invalid default target language '{}', using English",
                    settings.default_target
                );
                ENGLISH.to_string()
            }
        };

        Self {
            history: InputHistory::new(settings.history_limit),
            settings,
            capabilities,

            source,
            target,
            input: String::new(),
            output: String::new(),
            loading: false,

            pending_snapshot: None,

            open_picker: None,
            source_query: String::new(),
            target_query: String::new(),

            selected_word: None,
            dictionary: None,

            liked: false,
            disliked: false,
            copied: false,
            listening: false,
            output_playback: Playback::default(),
            dictionary_playback: Playback::default(),

            timer_seq: 0,
            pending_timers: HashMap::new(),
            translation_generation: 0,
            detect_in_flight: false,
            lookup_generation: 0,

            close_when_settled: false,
            torn_down: false,
        }
    }

    /// Apply one event and return the effects it requires
    pub fn handle(&mut self, event: AppEvent) -> Vec<Effect> {
        let mut fx = Vec::new();

        if self.torn_down {
            tracing::debug!("Session torn down, ignoring {:?}", std::mem::discriminant(&event));
            return fx;
        }

        match event {
            AppEvent::UiEvent(event) => self.handle_ui(event, &mut fx),
            AppEvent::TimerFired(token) => self.on_timer(token, &mut fx),
            AppEvent::TranslationFinished { generation, result } => {
                self.on_translation_finished(generation, result, &mut fx)
            }
            AppEvent::DictionaryFinished { generation, entry } => {
                self.on_dictionary_finished(generation, entry)
            }
            AppEvent::PlaybackFinished { channel, generation } => {
                self.on_playback_finished(channel, generation)
            }
            AppEvent::Recognition(event) => self.on_recognition(event, &mut fx),
            AppEvent::ClipboardWritten { success } => self.on_clipboard_written(success, &mut fx),
            AppEvent::Shutdown => self.teardown(&mut fx),
            // Front-end bound events
            AppEvent::Render(_)
            | AppEvent::Notice(_)
            | AppEvent::BackendReady
            | AppEvent::SessionEnded => {}
        }

        if self.close_when_settled && !self.torn_down && self.is_settled() {
            tracing::debug!("Input ended and nothing is pending");
            self.teardown(&mut fx);
        }

        fx
    }

    fn handle_ui(&mut self, event: UiEvent, fx: &mut Vec<Effect>) {
        match event {
            UiEvent::InputChanged(text) => self.on_input_changed(text, fx),
            UiEvent::Undo => self.undo(fx),
            UiEvent::Redo => self.redo(fx),
            UiEvent::TogglePicker(side) => self.toggle_picker(side),
            UiEvent::SearchLanguage { side, query } => self.search_language(side, query),
            UiEvent::SelectLanguage { side, code } => self.select_language(side, &code, fx),
            UiEvent::PointerDown { inside } => self.pointer_down(inside),
            UiEvent::SwapLanguages => self.swap_languages(fx),
            UiEvent::SelectText { pane, selection } => self.select_text(pane, &selection, fx),
            UiEvent::TogglePlayback(channel) => self.toggle_playback(channel, fx),
            UiEvent::PlayPronunciation => self.play_pronunciation(fx),
            UiEvent::VoiceInput => self.voice_input(fx),
            UiEvent::Copy => self.copy(fx),
            UiEvent::Like => {
                self.liked = !self.liked;
                self.disliked = false;
            }
            UiEvent::Dislike => {
                self.disliked = !self.disliked;
                self.liked = false;
            }
            UiEvent::EndOfInput => self.close_when_settled = true,
            UiEvent::Close => self.teardown(fx),
        }
    }

    // Input and history

    fn on_input_changed(&mut self, text: String, fx: &mut Vec<Effect>) {
        if self.copied {
            self.copied = false;
            self.cancel_timer(TimerKind::CopiedReset, fx);
        }
        self.set_input(text, true, fx);
    }

    /// Replace the input; `record` routes the text through the debounced history
    fn set_input(&mut self, text: String, record: bool, fx: &mut Vec<Effect>) {
        if text == self.input {
            return;
        }
        self.input = text;

        if record {
            self.pending_snapshot = Some(self.input.clone());
            self.schedule(TimerKind::History, self.settings.history_debounce, fx);
        }

        self.trigger_translation(fx);
    }

    /// Commit a snapshot still waiting for its debounce
    fn flush_pending_snapshot(&mut self, fx: &mut Vec<Effect>) {
        if let Some(text) = self.pending_snapshot.take() {
            self.cancel_timer(TimerKind::History, fx);
            self.history.commit(text);
        }
    }

    fn undo(&mut self, fx: &mut Vec<Effect>) {
        self.flush_pending_snapshot(fx);
        if let Some(text) = self.history.undo().map(str::to_string) {
            self.set_input(text, false, fx);
        }
    }

    fn redo(&mut self, fx: &mut Vec<Effect>) {
        self.flush_pending_snapshot(fx);
        if let Some(text) = self.history.redo().map(str::to_string) {
            self.set_input(text, false, fx);
        }
    }

    // Translation

    /// Input or a language changed: restart the debounce, or clear right away
    fn trigger_translation(&mut self, fx: &mut Vec<Effect>) {
        if self.input.is_empty() {
            self.cancel_timer(TimerKind::Translation, fx);
            self.invalidate_translation();
            self.output.clear();
        } else {
            self.schedule(TimerKind::Translation, self.settings.translate_debounce, fx);
        }
    }

    /// Make any in-flight translation stale
    fn invalidate_translation(&mut self) {
        self.translation_generation += 1;
        self.loading = false;
    }

    fn issue_translation(&mut self, fx: &mut Vec<Effect>) {
        if self.input.is_empty() {
            return;
        }

        self.translation_generation += 1;
        let source = (!language::is_auto(&self.source)).then(|| self.source.clone());
        self.detect_in_flight = source.is_none();
        self.loading = true;

        tracing::debug!(
            "Issuing translation #{} ({} -> {})",
            self.translation_generation,
            self.source,
            self.target
        );
        fx.push(Effect::Translate {
            generation: self.translation_generation,
            request: TranslationRequest {
                text: self.input.clone(),
                source,
                target: self.target.clone(),
            },
        });
    }

    fn on_translation_finished(
        &mut self,
        generation: u64,
        result: Result<TranslationOutcome, String>,
        fx: &mut Vec<Effect>,
    ) {
        if generation != self.translation_generation {
            tracing::debug!(
                "Discarding stale translation #{} (latest #{})",
                generation,
                self.translation_generation
            );
            return;
        }

        self.loading = false;
        match result {
            Ok(outcome) => {
                self.output = outcome.text;
                // A selection made while the request was in flight wins over detection
                if self.detect_in_flight
                    && language::is_auto(&self.source)
                    && let Some(code) = outcome.detected_language
                {
                    self.apply_detected_language(&code, fx);
                }
            }
            Err(_) => {
                self.output = TRANSLATION_ERROR.to_string();
            }
        }
        self.detect_in_flight = false;
    }

    fn apply_detected_language(&mut self, code: &str, fx: &mut Vec<Effect>) {
        match language::find(code) {
            Some(lang) if !language::is_auto(lang.code) => {
                tracing::info!("Detected source language: {}", lang.name);
                self.source = lang.code.to_string();
                self.trigger_translation(fx);
            }
            _ => tracing::warn!("Detected language '{}' is not in the catalog", code),
        }
    }

    // Language selection

    fn toggle_picker(&mut self, side: Side) {
        self.open_picker = if self.open_picker == Some(side) { None } else { Some(side) };
    }

    fn search_language(&mut self, side: Side, query: String) {
        *self.query_mut(side) = query;
    }

    fn select_language(&mut self, side: Side, code: &str, fx: &mut Vec<Effect>) {
        let lang = match language::find(code) {
            Some(lang) if !(side == Side::Target && language::is_auto(lang.code)) => lang,
            _ => {
                tracing::warn!("Rejected {} language '{}'", side.label(), code);
                return;
            }
        };

        if self.open_picker == Some(side) {
            self.open_picker = None;
        }
        self.query_mut(side).clear();
        self.clear_dictionary();

        let current = match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        };
        if *current != lang.code {
            *current = lang.code.to_string();
            self.trigger_translation(fx);
        }
    }

    fn pointer_down(&mut self, inside: Option<Side>) {
        if let Some(open) = self.open_picker
            && inside != Some(open)
        {
            self.open_picker = None;
        }
    }

    fn swap_languages(&mut self, fx: &mut Vec<Effect>) {
        std::mem::swap(&mut self.source, &mut self.target);
        // The pending result belongs to the old direction
        self.invalidate_translation();
        self.input = std::mem::take(&mut self.output);
        self.trigger_translation(fx);
    }

    fn query_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::Source => &mut self.source_query,
            Side::Target => &mut self.target_query,
        }
    }

    // Dictionary

    fn select_text(&mut self, pane: Side, selection: &str, fx: &mut Vec<Effect>) {
        let word = SelectionPreprocessor.process(selection);
        if word.is_empty() {
            self.clear_dictionary();
            return;
        }
        self.selected_word = Some(word.clone());

        let lang = match pane {
            Side::Source => &self.source,
            Side::Target => &self.target,
        };
        if !self.settings.dictionary_enabled || !language::is_english(lang) {
            self.clear_dictionary();
            return;
        }

        self.lookup_generation += 1;
        fx.push(Effect::LookupWord {
            generation: self.lookup_generation,
            word,
        });
    }

    fn on_dictionary_finished(&mut self, generation: u64, entry: Option<DictionaryEntry>) {
        if generation != self.lookup_generation {
            tracing::debug!("Discarding superseded dictionary lookup #{}", generation);
            return;
        }
        self.dictionary = entry.filter(DictionaryEntry::is_usable);
    }

    /// Hide the panel and make any in-flight lookup stale
    fn clear_dictionary(&mut self) {
        self.dictionary = None;
        self.lookup_generation += 1;
    }

    // Speech

    fn playback_mut(&mut self, channel: PlaybackChannel) -> &mut Playback {
        match channel {
            PlaybackChannel::Output => &mut self.output_playback,
            PlaybackChannel::Dictionary => &mut self.dictionary_playback,
        }
    }

    fn toggle_playback(&mut self, channel: PlaybackChannel, fx: &mut Vec<Effect>) {
        if self.playback_mut(channel).playing {
            self.playback_mut(channel).playing = false;
            fx.push(Effect::StopSpeaking(channel));
            return;
        }

        let (text, locale) = match channel {
            PlaybackChannel::Output => (self.output.clone(), language::speech_locale(&self.target)),
            PlaybackChannel::Dictionary => match &self.dictionary {
                Some(entry) => (entry.word.clone(), language::speech_locale(ENGLISH)),
                None => return,
            },
        };
        if text.trim().is_empty() {
            return;
        }
        if !self.capabilities.synthesis {
            fx.push(Effect::Notify(SYNTHESIS_UNSUPPORTED.to_string()));
            return;
        }

        let playback = self.playback_mut(channel);
        playback.generation += 1;
        playback.playing = true;
        let generation = playback.generation;

        fx.push(Effect::Speak {
            channel,
            generation,
            text,
            locale: locale.to_string(),
        });
    }

    fn on_playback_finished(&mut self, channel: PlaybackChannel, generation: u64) {
        let playback = self.playback_mut(channel);
        if playback.generation == generation {
            playback.playing = false;
        }
    }

    fn play_pronunciation(&mut self, fx: &mut Vec<Effect>) {
        let Some(entry) = &self.dictionary else {
            return;
        };
        let Some(url) = entry.audio_urls.first().cloned() else {
            fx.push(Effect::Notify(NO_PRONUNCIATION_AUDIO.to_string()));
            return;
        };
        if !self.capabilities.audio {
            fx.push(Effect::Notify(AUDIO_UNSUPPORTED.to_string()));
            return;
        }
        fx.push(Effect::PlayAudio(url));
    }

    fn voice_input(&mut self, fx: &mut Vec<Effect>) {
        if !self.capabilities.recognition {
            fx.push(Effect::Notify(RECOGNITION_UNSUPPORTED.to_string()));
            return;
        }
        if self.listening {
            tracing::debug!("Voice input already listening");
            return;
        }

        self.listening = true;
        fx.push(Effect::StartRecognition {
            locale: language::speech_locale(&self.source).to_string(),
        });
    }

    fn on_recognition(&mut self, event: RecognitionEvent, fx: &mut Vec<Effect>) {
        match event {
            RecognitionEvent::Started => self.listening = true,
            RecognitionEvent::Transcript(transcript) => {
                let transcript = transcript.trim();
                if transcript.is_empty() {
                    return;
                }
                let text = if self.input.is_empty() {
                    transcript.to_string()
                } else {
                    format!("{} {}", self.input, transcript).trim().to_string()
                };
                self.set_input(text, true, fx);
            }
            RecognitionEvent::Ended | RecognitionEvent::Failed(_) => self.listening = false,
        }
    }

    // Clipboard

    fn copy(&mut self, fx: &mut Vec<Effect>) {
        if !self.output.is_empty() {
            fx.push(Effect::WriteClipboard(self.output.clone()));
        }
    }

    fn on_clipboard_written(&mut self, success: bool, fx: &mut Vec<Effect>) {
        if success {
            self.copied = true;
            self.schedule(TimerKind::CopiedReset, self.settings.copied_reset, fx);
        }
    }

    // Timers

    fn schedule(&mut self, kind: TimerKind, delay: Duration, fx: &mut Vec<Effect>) {
        self.timer_seq += 1;
        let token = TimerToken {
            kind,
            seq: self.timer_seq,
        };
        self.pending_timers.insert(kind, token.seq);
        fx.push(Effect::Schedule { token, delay });
    }

    fn cancel_timer(&mut self, kind: TimerKind, fx: &mut Vec<Effect>) {
        if self.pending_timers.remove(&kind).is_some() {
            fx.push(Effect::Cancel(kind));
        }
    }

    fn on_timer(&mut self, token: TimerToken, fx: &mut Vec<Effect>) {
        if self.pending_timers.get(&token.kind) != Some(&token.seq) {
            tracing::debug!("Ignoring stale timer {:?}", token);
            return;
        }
        self.pending_timers.remove(&token.kind);

        match token.kind {
            TimerKind::History => {
                if let Some(text) = self.pending_snapshot.take() {
                    self.history.commit(text);
                }
            }
            TimerKind::Translation => self.issue_translation(fx),
            TimerKind::CopiedReset => self.copied = false,
        }
    }

    fn teardown(&mut self, fx: &mut Vec<Effect>) {
        tracing::info!("Tearing down translator session");
        self.torn_down = true;
        self.pending_timers.clear();
        self.pending_snapshot = None;
        self.loading = false;
        fx.push(Effect::Teardown);
    }

    // Read access

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// No debounce is waiting and no translation is in flight
    pub fn is_settled(&self) -> bool {
        !self.loading
            && !self.pending_timers.contains_key(&TimerKind::Translation)
            && !self.pending_timers.contains_key(&TimerKind::History)
    }

    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    pub fn open_picker(&self) -> Option<Side> {
        self.open_picker
    }

    pub fn query(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.source_query,
            Side::Target => &self.target_query,
        }
    }

    pub fn dictionary_entry(&self) -> Option<&DictionaryEntry> {
        self.dictionary.as_ref()
    }

    pub fn is_playing(&self, channel: PlaybackChannel) -> bool {
        match channel {
            PlaybackChannel::Output => self.output_playback.playing,
            PlaybackChannel::Dictionary => self.dictionary_playback.playing,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            source: language_view(&self.source),
            target: language_view(&self.target),
            input: self.input.clone(),
            output: self.output.clone(),
            char_count: self.input.chars().count(),
            max_chars: self.settings.max_input_chars,
            loading: self.loading,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            picker: self.open_picker.map(|side| self.picker_view(side)),
            dictionary: self.dictionary_panel(),
            selected_word: self.selected_word.clone(),
            liked: self.liked,
            disliked: self.disliked,
            copied: self.copied,
            listening: self.listening,
            output_playing: self.output_playback.playing,
            dictionary_playing: self.dictionary_playback.playing,
        }
    }

    fn picker_view(&self, side: Side) -> PickerView {
        let query = self.query(side);
        let options = language::filter(query)
            .into_iter()
            // Detection only makes sense for the source
            .filter(|lang| side == Side::Source || !language::is_auto(lang.code))
            .map(|lang| PickerOption {
                name: lang.name.to_string(),
                code: lang.code.to_string(),
                highlights: language::highlight_ranges(lang.name, query),
            })
            .collect();

        PickerView {
            side,
            query: query.to_string(),
            options,
        }
    }

    fn dictionary_panel(&self) -> DictionaryPanel {
        match &self.dictionary {
            Some(entry) => DictionaryPanel::Entry(entry.clone()),
            None if language::is_english(&self.source) || language::is_english(&self.target) => {
                DictionaryPanel::Message(DICTIONARY_ENGLISH_ONLY.to_string())
            }
            None => DictionaryPanel::Message(DICTIONARY_UNSUPPORTED.to_string()),
        }
    }
}

fn language_view(code: &str) -> LanguageView {
    LanguageView {
        code: code.to_string(),
        name: language::display_name(code),
    }
}
