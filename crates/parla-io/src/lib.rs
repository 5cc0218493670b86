pub mod clipboard;
pub mod speech;

pub use clipboard::ClipboardError;
pub use speech::{CommandAudioPlayer, CommandRecognizer, CommandSynthesizer};
