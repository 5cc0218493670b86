pub mod dictionary;
pub mod effect;
pub mod types;
pub mod view;

pub use dictionary::{Definition, DictionaryEntry, Meaning};
pub use effect::Effect;
pub use types::*;
pub use view::{DictionaryPanel, LanguageView, PickerOption, PickerView, SessionView};
