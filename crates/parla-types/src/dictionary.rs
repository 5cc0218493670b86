use serde::{Deserialize, Serialize};

/// One looked-up word as shown in the dictionary panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub phonetic: Option<String>,
    pub meanings: Vec<Meaning>,
    /// Pronunciation recordings, may be empty
    pub audio_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    pub example: Option<String>,
}

impl DictionaryEntry {
    /// Whether the entry has anything worth displaying
    pub fn is_usable(&self) -> bool {
        !self.word.trim().is_empty()
            && self.meanings.iter().any(|m| !m.definitions.is_empty())
    }
}
