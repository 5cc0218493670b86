use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default selection preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        let text: String = text.nfkc().collect();

        // Selections may span line breaks; collapse all whitespace runs
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Turns a raw text selection into the word handed to the dictionary
pub struct SelectionPreprocessor;
impl Preprocessor for SelectionPreprocessor {}
