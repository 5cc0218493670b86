pub mod history;
pub mod language;
pub mod preprocess;
pub mod scheduler;
pub mod session;
pub mod speech;

pub use history::InputHistory;
pub use language::Language;
pub use scheduler::{ManualScheduler, Scheduler};
pub use session::{Session, SessionSettings};
pub use speech::{
    AudioPlayer, Capabilities, Capability, SpeechError, SpeechRecognizer, SpeechSynthesizer,
};

#[cfg(test)]
mod tests;
