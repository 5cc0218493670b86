use std::fmt::Write;
use std::ops::Range;

use parla_types::{DictionaryEntry, DictionaryPanel, PickerView, SessionView};

/// Text block for one session snapshot
pub fn render(view: &SessionView) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({}) <-> {} ({})",
        view.source.name, view.source.code, view.target.name, view.target.code
    );

    let _ = writeln!(out, "Input:  {}", view.input);
    let _ = writeln!(out, "        {}", input_status(view));

    let _ = write!(out, "Output: {}", view.output);
    let flags = output_flags(view);
    if !flags.is_empty() {
        let _ = write!(out, "  [{}]", flags.join(", "));
    }
    out.push('\n');

    if let Some(picker) = &view.picker {
        render_picker(&mut out, picker);
    }

    match &view.dictionary {
        DictionaryPanel::Entry(entry) => render_entry(&mut out, entry, view.dictionary_playing),
        DictionaryPanel::Message(message) => {
            let _ = writeln!(out, "Dictionary: {}", message);
        }
    }

    out
}

fn input_status(view: &SessionView) -> String {
    let mut status = format!("{} / {}", view.char_count, view.max_chars);
    if view.can_undo {
        status.push_str(" | undo");
    }
    if view.can_redo {
        status.push_str(" | redo");
    }
    if view.listening {
        status.push_str(" | listening...");
    }
    status
}

fn output_flags(view: &SessionView) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if view.loading {
        flags.push("translating...");
    }
    if view.output_playing {
        flags.push("speaking");
    }
    if view.copied {
        flags.push("copied");
    }
    if view.liked {
        flags.push("liked");
    }
    if view.disliked {
        flags.push("disliked");
    }
    flags
}

fn render_picker(out: &mut String, picker: &PickerView) {
    let _ = write!(out, "Select {} language", picker.side.label());
    if !picker.query.is_empty() {
        let _ = write!(out, " matching '{}'", picker.query);
    }
    out.push_str(":\n");

    if picker.options.is_empty() {
        let _ = writeln!(out, "  No results for '{}'.", picker.query);
        return;
    }

    for (i, option) in picker.options.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {} ({})",
            i + 1,
            highlight(&option.name, &option.highlights),
            option.code
        );
    }
}

fn render_entry(out: &mut String, entry: &DictionaryEntry, playing: bool) {
    let _ = write!(out, "Dictionary: {}", entry.word);
    if let Some(phonetic) = &entry.phonetic {
        let _ = write!(out, " {}", phonetic);
    }
    if playing {
        out.push_str("  [speaking]");
    }
    out.push('\n');

    for meaning in &entry.meanings {
        let _ = writeln!(out, "  {}", meaning.part_of_speech);
        for (i, definition) in meaning.definitions.iter().enumerate() {
            let _ = writeln!(out, "    {}. {}", i + 1, definition.text);
            if let Some(example) = &definition.example {
                let _ = writeln!(out, "       \"{}\"", example);
            }
        }
    }

    if let Some(url) = entry.audio_urls.first() {
        let _ = writeln!(out, "  audio: {}  (:play-audio)", url);
    }
}

/// Wrap each matched range in brackets
fn highlight(name: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(name.len() + ranges.len() * 2);
    let mut last = 0;

    for range in ranges {
        let (Some(before), Some(matched)) = (name.get(last..range.start), name.get(range.clone()))
        else {
            // Ranges that do not fall on char boundaries are not drawn
            return name.to_string();
        };
        out.push_str(before);
        out.push('[');
        out.push_str(matched);
        out.push(']');
        last = range.end;
    }

    out.push_str(name.get(last..).unwrap_or_default());
    out
}
