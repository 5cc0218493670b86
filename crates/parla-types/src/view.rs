use std::ops::Range;

use crate::dictionary::DictionaryEntry;
use crate::types::Side;

/// Read-only snapshot of the session handed to the front end
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub source: LanguageView,
    pub target: LanguageView,
    pub input: String,
    pub output: String,
    pub char_count: usize,
    pub max_chars: usize,
    pub loading: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    /// At most one picker is open at a time
    pub picker: Option<PickerView>,
    pub dictionary: DictionaryPanel,
    pub selected_word: Option<String>,
    pub liked: bool,
    pub disliked: bool,
    pub copied: bool,
    pub listening: bool,
    pub output_playing: bool,
    pub dictionary_playing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageView {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub side: Side,
    pub query: String,
    pub options: Vec<PickerOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub name: String,
    pub code: String,
    /// Byte ranges of `name` matching the query
    pub highlights: Vec<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryPanel {
    Entry(DictionaryEntry),
    Message(String),
}
