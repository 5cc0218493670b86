use parla_types::{PlaybackChannel, Side, UiEvent};

use crate::state::UiState;

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Send(Vec<UiEvent>),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command ':{0}', try :help")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Open a picker first with :from or :to")]
    NoPicker,

    #[error("No option {0} in the picker")]
    NoOption(usize),
}

pub const HELP: &str = "\
Type any text to translate it. Commands:
  :clear                clear the input
  :undo / :redo         step through input history
  :from / :to           open the source / target language picker
  :from <code>          pick a source language directly (same for :to)
  :search <query>       filter the open picker
  :pick <n|code>        choose from the open picker
  :close                close the open picker
  :swap                 swap languages
  :lookup in|out <text> look a word up from the input / output pane
  :speak / :speak-word  play the translation / dictionary word
  :play-audio           play the recorded pronunciation of the dictionary word
  :mic                  dictate into the input
  :copy                 copy the translation
  :like / :dislike      rate the translation
  :help                 show this help
  :quit                 exit";

/// Parse one line read from the prompt
pub fn parse(line: &str, state: &UiState) -> Result<Command, CommandError> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(send(UiEvent::InputChanged(line.to_string())));
    };
    // `::text` enters text that starts with a colon
    if rest.starts_with(':') {
        return Ok(send(UiEvent::InputChanged(rest.to_string())));
    }

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let event = match name {
        "clear" => UiEvent::InputChanged(String::new()),
        "undo" => UiEvent::Undo,
        "redo" => UiEvent::Redo,
        "from" => return Ok(language_command(Side::Source, arg)),
        "to" => return Ok(language_command(Side::Target, arg)),
        "search" => UiEvent::SearchLanguage {
            side: open_picker(state)?,
            query: arg.to_string(),
        },
        "pick" => pick(arg, state)?,
        "close" => UiEvent::PointerDown { inside: None },
        "swap" => UiEvent::SwapLanguages,
        "lookup" => lookup(arg)?,
        "speak" => UiEvent::TogglePlayback(PlaybackChannel::Output),
        "speak-word" => UiEvent::TogglePlayback(PlaybackChannel::Dictionary),
        "play-audio" => UiEvent::PlayPronunciation,
        "mic" => UiEvent::VoiceInput,
        "copy" => UiEvent::Copy,
        "like" => UiEvent::Like,
        "dislike" => UiEvent::Dislike,
        "help" => return Ok(Command::Help),
        "quit" | "q" => return Ok(Command::Quit),
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(send(event))
}

fn send(event: UiEvent) -> Command {
    Command::Send(vec![event])
}

/// `:from` toggles the picker; `:from <code>` selects right away
fn language_command(side: Side, arg: &str) -> Command {
    if arg.is_empty() {
        send(UiEvent::TogglePicker(side))
    } else {
        send(UiEvent::SelectLanguage {
            side,
            code: arg.to_string(),
        })
    }
}

fn open_picker(state: &UiState) -> Result<Side, CommandError> {
    state
        .view()
        .and_then(|v| v.picker.as_ref())
        .map(|p| p.side)
        .ok_or(CommandError::NoPicker)
}

/// A 1-based position in the displayed list, or a language code
fn pick(arg: &str, state: &UiState) -> Result<UiEvent, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::Usage(":pick <n|code>"));
    }
    let picker = state
        .view()
        .and_then(|v| v.picker.as_ref())
        .ok_or(CommandError::NoPicker)?;

    let code = match arg.parse::<usize>() {
        Ok(n) => picker
            .options
            .get(n.wrapping_sub(1))
            .map(|o| o.code.clone())
            .ok_or(CommandError::NoOption(n))?,
        Err(_) => arg.to_string(),
    };

    Ok(UiEvent::SelectLanguage {
        side: picker.side,
        code,
    })
}

fn lookup(arg: &str) -> Result<UiEvent, CommandError> {
    const USAGE: &str = ":lookup in|out <text>";

    let (pane, selection) = arg.split_once(char::is_whitespace).ok_or(CommandError::Usage(USAGE))?;
    let pane = match pane {
        "in" => Side::Source,
        "out" => Side::Target,
        _ => return Err(CommandError::Usage(USAGE)),
    };

    Ok(UiEvent::SelectText {
        pane,
        selection: selection.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use parla_types::{
        DictionaryPanel, LanguageView, PickerOption, PickerView, SessionView,
    };

    use super::*;

    fn language(code: &str, name: &str) -> LanguageView {
        LanguageView {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    fn view_with_picker(side: Side, codes: &[(&str, &str)]) -> SessionView {
        SessionView {
            source: language("auto", "Detect language"),
            target: language("EN", "English"),
            input: String::new(),
            output: String::new(),
            char_count: 0,
            max_chars: 5000,
            loading: false,
            can_undo: false,
            can_redo: false,
            picker: Some(PickerView {
                side,
                query: String::new(),
                options: codes
                    .iter()
                    .map(|(code, name)| PickerOption {
                        name: name.to_string(),
                        code: code.to_string(),
                        highlights: vec![],
                    })
                    .collect(),
            }),
            dictionary: DictionaryPanel::Message(String::new()),
            selected_word: None,
            liked: false,
            disliked: false,
            copied: false,
            listening: false,
            output_playing: false,
            dictionary_playing: false,
        }
    }

    fn events(command: Command) -> Vec<UiEvent> {
        match command {
            Command::Send(events) => events,
            other => panic!("expected events, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_replaces_input() {
        let state = UiState::new();
        let parsed = events(parse("Hola amigo", &state).unwrap());
        assert!(matches!(&parsed[..], [UiEvent::InputChanged(t)] if t == "Hola amigo"));

        let parsed = events(parse("::)", &state).unwrap());
        assert!(matches!(&parsed[..], [UiEvent::InputChanged(t)] if t == ":)"));

        let parsed = events(parse(":clear", &state).unwrap());
        assert!(matches!(&parsed[..], [UiEvent::InputChanged(t)] if t.is_empty()));
    }

    #[test]
    fn simple_commands() {
        let state = UiState::new();
        assert!(matches!(
            &events(parse(":swap", &state).unwrap())[..],
            [UiEvent::SwapLanguages]
        ));
        assert!(matches!(
            &events(parse(":speak-word", &state).unwrap())[..],
            [UiEvent::TogglePlayback(PlaybackChannel::Dictionary)]
        ));
        assert!(matches!(
            &events(parse(":play-audio", &state).unwrap())[..],
            [UiEvent::PlayPronunciation]
        ));
        assert!(matches!(
            &events(parse(":from", &state).unwrap())[..],
            [UiEvent::TogglePicker(Side::Source)]
        ));
        assert_eq!(parse(":quit", &state), Ok(Command::Quit));
        assert_eq!(parse(":help", &state), Ok(Command::Help));
    }

    #[test]
    fn direct_language_selection() {
        let state = UiState::new();
        let parsed = events(parse(":to de", &state).unwrap());
        assert!(matches!(
            &parsed[..],
            [UiEvent::SelectLanguage { side: Side::Target, code }] if code == "de"
        ));
    }

    #[test]
    fn picker_commands_need_open_picker() {
        let state = UiState::new();
        assert_eq!(parse(":search fr", &state), Err(CommandError::NoPicker));
        assert_eq!(parse(":pick 1", &state), Err(CommandError::NoPicker));
    }

    #[test]
    fn pick_by_position_or_code() {
        let mut state = UiState::new();
        state.update(view_with_picker(
            Side::Target,
            &[("FR", "French"), ("DE", "German")],
        ));

        let parsed = events(parse(":pick 2", &state).unwrap());
        assert!(matches!(
            &parsed[..],
            [UiEvent::SelectLanguage { side: Side::Target, code }] if code == "DE"
        ));

        let parsed = events(parse(":pick it", &state).unwrap());
        assert!(matches!(
            &parsed[..],
            [UiEvent::SelectLanguage { code, .. }] if code == "it"
        ));

        assert_eq!(parse(":pick 0", &state), Err(CommandError::NoOption(0)));
        assert_eq!(parse(":pick 3", &state), Err(CommandError::NoOption(3)));

        let parsed = events(parse(":search  ger ", &state).unwrap());
        assert!(matches!(
            &parsed[..],
            [UiEvent::SearchLanguage { side: Side::Target, query }] if query == "ger"
        ));
    }

    #[test]
    fn lookup_panes() {
        let state = UiState::new();
        let parsed = events(parse(":lookup out run away", &state).unwrap());
        assert!(matches!(
            &parsed[..],
            [UiEvent::SelectText { pane: Side::Target, selection }] if selection == "run away"
        ));

        assert!(matches!(
            parse(":lookup sideways run", &state),
            Err(CommandError::Usage(_))
        ));
        assert!(matches!(parse(":lookup", &state), Err(CommandError::Usage(_))));
    }

    #[test]
    fn unknown_command() {
        let state = UiState::new();
        assert_eq!(
            parse(":frobnicate now", &state),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }
}
