use parla_types::{
    AppEvent, Definition, DictionaryEntry, DictionaryPanel, Effect, Meaning, PlaybackChannel,
    RecognitionEvent, Side, TimerKind, UiEvent,
};

use super::harness::Harness;
use crate::session::{
    AUDIO_UNSUPPORTED, DICTIONARY_ENGLISH_ONLY, DICTIONARY_UNSUPPORTED, NO_PRONUNCIATION_AUDIO,
    RECOGNITION_UNSUPPORTED, SYNTHESIS_UNSUPPORTED, SessionSettings, TRANSLATION_ERROR,
};
use crate::speech::Capabilities;

fn run_entry() -> DictionaryEntry {
    DictionaryEntry {
        word: "run".to_string(),
        phonetic: Some("/ɹʌn/".to_string()),
        meanings: vec![Meaning {
            part_of_speech: "verb".to_string(),
            definitions: vec![Definition {
                text: "To move swiftly.".to_string(),
                example: None,
            }],
        }],
        audio_urls: vec![],
    }
}

fn with_speech() -> Harness {
    Harness::with(
        SessionSettings::default(),
        Capabilities {
            synthesis: true,
            recognition: true,
            audio: false,
        },
    )
}

// History

#[test]
fn rapid_edits_record_one_snapshot_and_one_request() {
    let mut h = Harness::new();

    h.type_text("H");
    h.advance_ms(100);
    h.type_text("Hello");
    h.advance_ms(299);
    assert!(h.translations().is_empty());

    h.advance_ms(1);

    assert_eq!(h.session.history().snapshots(), &["", "Hello"]);
    let requests = h.translations();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1.text, "Hello");
    assert!(h.session.is_loading());
}

#[test]
fn undo_then_redo_restores_text() {
    let mut h = Harness::new();
    for text in ["a", "ab", "abc"] {
        h.type_text(text);
        h.advance_ms(300);
    }

    h.ui(UiEvent::Undo);
    assert_eq!(h.session.input(), "ab");
    h.ui(UiEvent::Redo);
    assert_eq!(h.session.input(), "abc");

    h.ui(UiEvent::Undo);
    h.ui(UiEvent::Undo);
    h.ui(UiEvent::Undo);
    assert_eq!(h.session.input(), "");
    assert!(!h.session.view().can_undo);
}

#[test]
fn undo_at_start_and_redo_at_end_do_nothing() {
    let mut h = Harness::new();
    h.ui(UiEvent::Undo);
    assert_eq!(h.session.input(), "");
    assert!(h.effects.is_empty());
    assert_eq!(h.scheduler.pending_count(), 0);

    h.type_text("a");
    h.advance_ms(300);
    h.ui(UiEvent::Redo);
    assert_eq!(h.session.input(), "a");
    assert_eq!(h.session.history().cursor(), 1);
}

#[test]
fn edit_after_undo_truncates_redo_branch() {
    let mut h = Harness::new();
    for text in ["a", "ab", "abc"] {
        h.type_text(text);
        h.advance_ms(300);
    }
    h.ui(UiEvent::Undo);
    h.ui(UiEvent::Undo);

    h.type_text("ax");
    h.advance_ms(300);

    assert_eq!(h.session.history().snapshots(), &["", "a", "ax"]);
    assert!(!h.session.view().can_redo);
}

#[test]
fn undo_commits_a_pending_edit_first() {
    let mut h = Harness::new();
    h.type_text("a");
    h.advance_ms(300);
    h.type_text("ab");

    h.ui(UiEvent::Undo);

    assert_eq!(h.session.input(), "a");
    assert_eq!(h.session.history().snapshots(), &["", "a", "ab"]);
    assert!(!h.scheduler.is_pending(TimerKind::History));
}

// Translation

#[test]
fn clearing_input_clears_output_without_request() {
    let mut h = Harness::new();
    h.translate("Hola", "Hello");
    assert_eq!(h.session.output(), "Hello");
    let issued = h.translations().len();

    h.type_text("");

    assert_eq!(h.session.output(), "");
    assert!(!h.session.is_loading());
    h.advance_ms(1000);
    assert_eq!(h.translations().len(), issued);
}

#[test]
fn clearing_input_discards_in_flight_request() {
    let mut h = Harness::new();
    h.type_text("Hola");
    h.advance_ms(300);
    let (generation, _) = h.last_translation();

    h.type_text("");
    h.finish_translation(generation, "Hello", None);

    assert_eq!(h.session.output(), "");
}

#[test]
fn auto_detect_updates_source_language() {
    let mut h = Harness::with_languages("auto", "EN");
    h.type_text("Hola");
    h.advance_ms(300);

    let (generation, request) = h.last_translation();
    assert_eq!(request.text, "Hola");
    assert!(request.is_detect());
    assert_eq!(request.target, "EN");

    h.finish_translation(generation, "Hello", Some("ES"));

    assert_eq!(h.session.source(), "ES");
    assert_eq!(h.session.output(), "Hello");
    assert_eq!(h.session.view().source.name, "Spanish");

    // The new source re-triggers a translation with an explicit language
    h.advance_ms(300);
    let (_, request) = h.last_translation();
    assert_eq!(request.source.as_deref(), Some("ES"));
}

#[test]
fn unknown_detected_language_keeps_auto() {
    let mut h = Harness::with_languages("auto", "EN");
    h.type_text("???");
    h.advance_ms(300);
    let (generation, _) = h.last_translation();

    h.finish_translation(generation, "???", Some("XX"));

    assert_eq!(h.session.source(), "auto");
}

#[test]
fn manual_source_change_wins_over_in_flight_detection() {
    let mut h = Harness::with_languages("auto", "EN");
    h.type_text("Hola");
    h.advance_ms(300);
    let (generation, _) = h.last_translation();

    h.ui(UiEvent::SelectLanguage {
        side: Side::Source,
        code: "PT".to_string(),
    });
    h.finish_translation(generation, "Hello", Some("ES"));

    assert_eq!(h.session.source(), "PT");
}

#[test]
fn stale_completion_is_ignored() {
    let mut h = Harness::new();
    h.type_text("Hol");
    h.advance_ms(300);
    let (first, _) = h.last_translation();
    h.type_text("Hola");
    h.advance_ms(300);
    let (second, _) = h.last_translation();
    assert!(second > first);

    h.finish_translation(first, "Hol?", None);
    assert_eq!(h.session.output(), "");
    assert!(h.session.is_loading());

    h.finish_translation(second, "Hello", None);
    assert_eq!(h.session.output(), "Hello");
    assert!(!h.session.is_loading());

    h.finish_translation(first, "Hol?", None);
    assert_eq!(h.session.output(), "Hello");
}

#[test]
fn failure_shows_error_placeholder() {
    let mut h = Harness::new();
    h.type_text("Hola");
    h.advance_ms(300);
    let (generation, _) = h.last_translation();

    h.send(AppEvent::TranslationFinished {
        generation,
        result: Err("HTTP 500".to_string()),
    });

    assert_eq!(h.session.output(), TRANSLATION_ERROR);
    assert!(!h.session.is_loading());
    h.advance_ms(5000);
    assert_eq!(h.translations().len(), 1);
}

#[test]
fn language_change_retriggers_translation() {
    let mut h = Harness::with_languages("ES", "EN");
    h.translate("Hola", "Hello");

    h.ui(UiEvent::SelectLanguage {
        side: Side::Target,
        code: "de".to_string(),
    });
    h.advance_ms(300);

    let (_, request) = h.last_translation();
    assert_eq!(request.target, "DE");
    assert_eq!(request.source.as_deref(), Some("ES"));
}

// Language selector

#[test]
fn swap_exchanges_languages_and_moves_output() {
    let mut h = Harness::with_languages("ES", "EN");
    h.translate("Hola", "Hello");

    h.ui(UiEvent::SwapLanguages);

    assert_eq!(h.session.source(), "EN");
    assert_eq!(h.session.target(), "ES");
    assert_eq!(h.session.input(), "Hello");
    assert_eq!(h.session.output(), "");

    h.advance_ms(300);
    let (_, request) = h.last_translation();
    assert_eq!(request.text, "Hello");
    assert_eq!(request.source.as_deref(), Some("EN"));
}

#[test]
fn pickers_are_mutually_exclusive() {
    let mut h = Harness::new();

    h.ui(UiEvent::TogglePicker(Side::Source));
    assert_eq!(h.session.open_picker(), Some(Side::Source));

    h.ui(UiEvent::TogglePicker(Side::Target));
    assert_eq!(h.session.open_picker(), Some(Side::Target));

    h.ui(UiEvent::TogglePicker(Side::Target));
    assert_eq!(h.session.open_picker(), None);
}

#[test]
fn pointer_outside_closes_picker() {
    let mut h = Harness::new();
    h.ui(UiEvent::TogglePicker(Side::Source));

    h.ui(UiEvent::PointerDown {
        inside: Some(Side::Source),
    });
    assert_eq!(h.session.open_picker(), Some(Side::Source));

    h.ui(UiEvent::PointerDown { inside: None });
    assert_eq!(h.session.open_picker(), None);
}

#[test]
fn selecting_language_closes_picker_and_resets_query() {
    let mut h = Harness::new();
    h.ui(UiEvent::TogglePicker(Side::Target));
    h.ui(UiEvent::SearchLanguage {
        side: Side::Target,
        query: "fre".to_string(),
    });

    let picker = h.session.view().picker.unwrap();
    assert_eq!(picker.options.len(), 1);
    assert_eq!(picker.options[0].code, "FR");
    assert_eq!(picker.options[0].highlights, vec![0..3]);

    h.ui(UiEvent::SelectLanguage {
        side: Side::Target,
        code: "FR".to_string(),
    });

    assert_eq!(h.session.target(), "FR");
    assert_eq!(h.session.open_picker(), None);
    assert_eq!(h.session.query(Side::Target), "");
}

#[test]
fn target_picker_cannot_pick_auto_detect() {
    let mut h = Harness::new();
    h.ui(UiEvent::TogglePicker(Side::Target));

    let picker = h.session.view().picker.unwrap();
    assert!(picker.options.iter().all(|o| o.code != "auto"));

    h.ui(UiEvent::SelectLanguage {
        side: Side::Target,
        code: "auto".to_string(),
    });
    assert_eq!(h.session.target(), "EN");
    assert_eq!(h.session.open_picker(), Some(Side::Target));
}

#[test]
fn unknown_language_code_changes_nothing() {
    let mut h = Harness::with_languages("EN", "ES");
    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "run".to_string(),
    });
    let (generation, _) = h.lookups().pop().unwrap();
    h.send(AppEvent::DictionaryFinished {
        generation,
        entry: Some(run_entry()),
    });
    h.ui(UiEvent::TogglePicker(Side::Source));
    h.ui(UiEvent::SearchLanguage {
        side: Side::Source,
        query: "ger".to_string(),
    });

    let effects = h.session.handle(AppEvent::UiEvent(UiEvent::SelectLanguage {
        side: Side::Source,
        code: "XX".to_string(),
    }));

    assert!(effects.is_empty());
    assert_eq!(h.session.source(), "EN");
    assert_eq!(h.session.open_picker(), Some(Side::Source));
    assert_eq!(h.session.query(Side::Source), "ger");
    assert_eq!(h.session.view().dictionary, DictionaryPanel::Entry(run_entry()));
}

#[test]
fn like_and_dislike_are_exclusive() {
    let mut h = Harness::new();
    h.ui(UiEvent::Like);
    h.ui(UiEvent::Dislike);

    let view = h.session.view();
    assert!(!view.liked);
    assert!(view.disliked);

    h.ui(UiEvent::Dislike);
    assert!(!h.session.view().disliked);
}

// Dictionary

#[test]
fn english_selection_is_looked_up_and_displayed() {
    let mut h = Harness::with_languages("EN", "ES");

    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "  run ".to_string(),
    });

    let (generation, word) = h.lookups().pop().unwrap();
    assert_eq!(word, "run");

    h.send(AppEvent::DictionaryFinished {
        generation,
        entry: Some(run_entry()),
    });

    match h.session.view().dictionary {
        DictionaryPanel::Entry(entry) => {
            assert_eq!(entry.meanings[0].part_of_speech, "verb");
            assert!(!entry.meanings[0].definitions.is_empty());
        }
        other => panic!("expected entry, got {other:?}"),
    }
    assert_eq!(h.session.view().selected_word.as_deref(), Some("run"));
}

#[test]
fn non_english_side_never_looks_up() {
    let mut h = Harness::with_languages("EN", "FR");

    h.ui(UiEvent::SelectText {
        pane: Side::Target,
        selection: "run".to_string(),
    });

    assert!(h.lookups().is_empty());
    assert!(h.session.dictionary_entry().is_none());
    assert_eq!(
        h.session.view().dictionary,
        DictionaryPanel::Message(DICTIONARY_ENGLISH_ONLY.to_string())
    );
}

#[test]
fn late_lookup_after_non_english_selection_is_dropped() {
    let mut h = Harness::with_languages("EN", "FR");
    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "run".to_string(),
    });
    let (generation, _) = h.lookups().pop().unwrap();

    h.ui(UiEvent::SelectText {
        pane: Side::Target,
        selection: "courir".to_string(),
    });
    h.send(AppEvent::DictionaryFinished {
        generation,
        entry: Some(run_entry()),
    });

    assert!(h.session.dictionary_entry().is_none());
}

#[test]
fn newer_lookup_supersedes_older() {
    let mut h = Harness::with_languages("EN", "ES");
    for word in ["run", "walk"] {
        h.ui(UiEvent::SelectText {
            pane: Side::Source,
            selection: word.to_string(),
        });
    }
    let lookups = h.lookups();
    let (older, newer) = (lookups[0].0, lookups[1].0);

    h.send(AppEvent::DictionaryFinished {
        generation: newer,
        entry: None,
    });
    h.send(AppEvent::DictionaryFinished {
        generation: older,
        entry: Some(run_entry()),
    });

    assert!(h.session.dictionary_entry().is_none());
}

#[test]
fn empty_selection_and_language_change_clear_panel() {
    let mut h = Harness::with_languages("EN", "ES");
    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "run".to_string(),
    });
    let (generation, _) = h.lookups().pop().unwrap();
    h.send(AppEvent::DictionaryFinished {
        generation,
        entry: Some(run_entry()),
    });
    assert!(h.session.dictionary_entry().is_some());

    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "   ".to_string(),
    });
    assert!(h.session.dictionary_entry().is_none());

    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "run".to_string(),
    });
    let (generation, _) = h.lookups().pop().unwrap();
    h.send(AppEvent::DictionaryFinished {
        generation,
        entry: Some(run_entry()),
    });
    h.ui(UiEvent::SelectLanguage {
        side: Side::Target,
        code: "FR".to_string(),
    });
    assert!(h.session.dictionary_entry().is_none());
}

#[test]
fn panel_message_depends_on_languages() {
    let h = Harness::with_languages("DE", "FR");
    assert_eq!(
        h.session.view().dictionary,
        DictionaryPanel::Message(DICTIONARY_UNSUPPORTED.to_string())
    );
}

#[test]
fn unusable_entry_is_not_displayed() {
    let mut h = Harness::with_languages("EN", "ES");
    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "zzz".to_string(),
    });
    let (generation, _) = h.lookups().pop().unwrap();

    h.send(AppEvent::DictionaryFinished {
        generation,
        entry: Some(DictionaryEntry {
            word: "zzz".to_string(),
            ..DictionaryEntry::default()
        }),
    });

    assert!(h.session.dictionary_entry().is_none());
}

// Speech

#[test]
fn voice_input_without_recognizer_shows_notice() {
    let mut h = Harness::new();
    h.ui(UiEvent::VoiceInput);

    assert_eq!(h.effects, vec![Effect::Notify(RECOGNITION_UNSUPPORTED.to_string())]);
    assert!(!h.session.is_listening());
}

#[test]
fn transcript_is_appended_with_space() {
    let mut h = with_speech();
    h.ui(UiEvent::SelectLanguage {
        side: Side::Source,
        code: "ES".to_string(),
    });
    h.type_text("Hola");

    h.ui(UiEvent::VoiceInput);
    assert!(h.effects.contains(&Effect::StartRecognition {
        locale: "es-ES".to_string()
    }));
    assert!(h.session.is_listening());

    // A second press while listening is ignored
    let before = h.effects.len();
    h.ui(UiEvent::VoiceInput);
    assert_eq!(h.effects.len(), before);

    h.send(AppEvent::Recognition(RecognitionEvent::Started));
    h.send(AppEvent::Recognition(RecognitionEvent::Transcript(" amigo ".to_string())));
    assert_eq!(h.session.input(), "Hola amigo");

    h.send(AppEvent::Recognition(RecognitionEvent::Ended));
    assert!(!h.session.is_listening());

    h.advance_ms(300);
    assert_eq!(h.session.history().current(), "Hola amigo");
}

#[test]
fn transcript_into_empty_input_has_no_leading_space() {
    let mut h = with_speech();
    h.ui(UiEvent::VoiceInput);
    h.send(AppEvent::Recognition(RecognitionEvent::Transcript("hello".to_string())));
    assert_eq!(h.session.input(), "hello");

    h.send(AppEvent::Recognition(RecognitionEvent::Failed("no-speech".to_string())));
    assert!(!h.session.is_listening());
}

#[test]
fn playback_toggles_and_ignores_old_completion() {
    let mut h = with_speech();
    h.ui(UiEvent::SelectLanguage {
        side: Side::Target,
        code: "JA".to_string(),
    });
    h.translate("Hello", "こんにちは");

    h.ui(UiEvent::TogglePlayback(PlaybackChannel::Output));
    let first = match h.effects.last() {
        Some(Effect::Speak {
            generation, locale, text, ..
        }) => {
            assert_eq!(locale, "ja-JP");
            assert_eq!(text, "こんにちは");
            *generation
        }
        other => panic!("expected speak, got {other:?}"),
    };
    assert!(h.session.is_playing(PlaybackChannel::Output));

    h.ui(UiEvent::TogglePlayback(PlaybackChannel::Output));
    assert_eq!(h.effects.last(), Some(&Effect::StopSpeaking(PlaybackChannel::Output)));
    assert!(!h.session.is_playing(PlaybackChannel::Output));

    h.ui(UiEvent::TogglePlayback(PlaybackChannel::Output));
    h.send(AppEvent::PlaybackFinished {
        channel: PlaybackChannel::Output,
        generation: first,
    });
    assert!(h.session.is_playing(PlaybackChannel::Output));

    h.send(AppEvent::PlaybackFinished {
        channel: PlaybackChannel::Output,
        generation: first + 1,
    });
    assert!(!h.session.is_playing(PlaybackChannel::Output));
}

#[test]
fn dictionary_playback_uses_english_voice() {
    let mut h = Harness::with(
        SessionSettings {
            default_source: "EN".to_string(),
            default_target: "ES".to_string(),
            ..SessionSettings::default()
        },
        Capabilities {
            synthesis: true,
            recognition: false,
            audio: false,
        },
    );

    // Nothing to say yet
    h.ui(UiEvent::TogglePlayback(PlaybackChannel::Dictionary));
    assert!(h.effects.is_empty());

    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "run".to_string(),
    });
    let (generation, _) = h.lookups().pop().unwrap();
    h.send(AppEvent::DictionaryFinished {
        generation,
        entry: Some(run_entry()),
    });

    h.ui(UiEvent::TogglePlayback(PlaybackChannel::Dictionary));
    assert!(matches!(
        h.effects.last(),
        Some(Effect::Speak { channel: PlaybackChannel::Dictionary, locale, text, .. })
            if locale == "en-US" && text == "run"
    ));
}

fn with_pronunciation(audio: bool, audio_urls: Vec<String>) -> Harness {
    let mut h = Harness::with(
        SessionSettings {
            default_source: "EN".to_string(),
            default_target: "ES".to_string(),
            ..SessionSettings::default()
        },
        Capabilities {
            audio,
            ..Capabilities::default()
        },
    );
    h.ui(UiEvent::SelectText {
        pane: Side::Source,
        selection: "run".to_string(),
    });
    let (generation, _) = h.lookups().pop().unwrap();
    h.send(AppEvent::DictionaryFinished {
        generation,
        entry: Some(DictionaryEntry {
            audio_urls,
            ..run_entry()
        }),
    });
    h
}

#[test]
fn pronunciation_plays_first_recording() {
    let mut h = with_pronunciation(
        true,
        vec![
            "https://audio.example/run-us.mp3".to_string(),
            "https://audio.example/run-uk.mp3".to_string(),
        ],
    );

    h.ui(UiEvent::PlayPronunciation);

    assert_eq!(
        h.effects.last(),
        Some(&Effect::PlayAudio("https://audio.example/run-us.mp3".to_string()))
    );
}

#[test]
fn pronunciation_without_recording_or_player_notifies() {
    let mut h = with_pronunciation(true, vec![]);
    h.ui(UiEvent::PlayPronunciation);
    assert_eq!(h.effects.last(), Some(&Effect::Notify(NO_PRONUNCIATION_AUDIO.to_string())));

    let mut h = with_pronunciation(false, vec!["https://audio.example/run.mp3".to_string()]);
    h.ui(UiEvent::PlayPronunciation);
    assert_eq!(h.effects.last(), Some(&Effect::Notify(AUDIO_UNSUPPORTED.to_string())));
}

#[test]
fn pronunciation_without_entry_does_nothing() {
    let mut h = Harness::with(
        SessionSettings::default(),
        Capabilities {
            audio: true,
            ..Capabilities::default()
        },
    );
    h.ui(UiEvent::PlayPronunciation);
    assert!(h.effects.is_empty());
}

#[test]
fn playback_without_synthesizer_shows_notice() {
    let mut h = Harness::new();
    h.translate("Hola", "Hello");

    h.ui(UiEvent::TogglePlayback(PlaybackChannel::Output));

    assert_eq!(h.effects.last(), Some(&Effect::Notify(SYNTHESIS_UNSUPPORTED.to_string())));
    assert!(!h.session.is_playing(PlaybackChannel::Output));
}

// Clipboard

#[test]
fn copied_flag_resets_after_delay_or_edit() {
    let mut h = Harness::new();
    h.ui(UiEvent::Copy);
    assert!(h.effects.is_empty());

    h.translate("Hola", "Hello");
    h.ui(UiEvent::Copy);
    assert_eq!(h.effects.last(), Some(&Effect::WriteClipboard("Hello".to_string())));

    h.send(AppEvent::ClipboardWritten { success: true });
    assert!(h.session.view().copied);
    h.advance_ms(2999);
    assert!(h.session.view().copied);
    h.advance_ms(1);
    assert!(!h.session.view().copied);

    h.send(AppEvent::ClipboardWritten { success: true });
    h.type_text("Hola!");
    assert!(!h.session.view().copied);
    assert!(!h.scheduler.is_pending(TimerKind::CopiedReset));
}

// Teardown

#[test]
fn nothing_changes_after_teardown() {
    let mut h = Harness::new();
    h.type_text("Hola");
    h.advance_ms(300);
    let (generation, _) = h.last_translation();
    h.type_text("Hola amigo");

    h.send(AppEvent::Shutdown);
    assert!(h.session.is_torn_down());
    assert_eq!(h.effects.last(), Some(&Effect::Teardown));
    assert_eq!(h.scheduler.pending_count(), 0);

    let issued = h.effects.len();
    h.finish_translation(generation, "Hello", None);
    h.type_text("more");
    h.advance_ms(1000);

    assert_eq!(h.session.output(), "");
    assert_eq!(h.session.input(), "Hola amigo");
    assert_eq!(h.effects.len(), issued);
}

#[test]
fn end_of_input_waits_for_pending_translation() {
    let mut h = Harness::with_languages("ES", "EN");
    h.type_text("Hola");
    h.ui(UiEvent::EndOfInput);
    assert!(!h.session.is_torn_down());

    h.advance_ms(300);
    let (generation, _) = h.last_translation();
    assert!(!h.session.is_torn_down());

    h.finish_translation(generation, "Hello", None);
    assert_eq!(h.session.output(), "Hello");
    assert!(h.session.is_torn_down());
    assert_eq!(h.effects.last(), Some(&Effect::Teardown));
}

#[test]
fn end_of_input_waits_for_translation_after_detection() {
    let mut h = Harness::new();
    h.type_text("Hola");
    h.ui(UiEvent::EndOfInput);
    h.advance_ms(300);
    let (generation, _) = h.last_translation();

    // Detection retriggers with the detected source
    h.finish_translation(generation, "Hello", Some("ES"));
    assert!(!h.session.is_torn_down());

    h.advance_ms(300);
    let (generation, request) = h.last_translation();
    assert_eq!(request.source.as_deref(), Some("ES"));
    h.send(AppEvent::TranslationFinished {
        generation,
        result: Err("offline".to_string()),
    });

    assert_eq!(h.session.output(), TRANSLATION_ERROR);
    assert!(h.session.is_torn_down());
}

#[test]
fn end_of_input_when_idle_closes_right_away() {
    let mut h = Harness::new();
    h.ui(UiEvent::EndOfInput);
    assert!(h.session.is_torn_down());
    assert_eq!(h.effects, vec![Effect::Teardown]);
}
