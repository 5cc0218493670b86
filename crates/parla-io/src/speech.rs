use std::process::Stdio;

use async_trait::async_trait;
use parla_core::speech::{
    AudioPlayer, SpeechError, SpeechRecognizer, SpeechSynthesizer, Utterance, Voice,
};
use tokio::process::Command;

/// Program and leading arguments parsed from a configured command line
#[derive(Debug, Clone, PartialEq, Eq)]
struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Split on whitespace; `None` for a blank line
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).kill_on_drop(true);
        command
    }
}

/// Speaks through an external program such as `espeak-ng` or `say`.
///
/// Invoked as `<command> -v <voice> -- <text>`. Without a selected voice the
/// `-v` pair is left out and the engine speaks with its default voice.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    command: CommandLine,
    voices: Vec<Voice>,
}

impl CommandSynthesizer {
    pub fn from_command_line(line: &str) -> Option<Self> {
        CommandLine::parse(line).map(|command| Self {
            command,
            voices: Vec::new(),
        })
    }

    /// Voices the engine is known to offer
    pub fn with_voices(mut self, voices: Vec<Voice>) -> Self {
        self.voices = voices;
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        tracing::debug!(
            "Speaking {} chars in {} with voice {:?}",
            utterance.text.len(),
            utterance.locale,
            utterance.voice.as_ref().map(|v| &v.name)
        );

        let status = self
            .command
            .command()
            .args(speak_args(&utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            return Err(SpeechError::Engine(format!(
                "{} exited with {}",
                self.command.program, status
            )));
        }
        Ok(())
    }
}

fn speak_args(utterance: &Utterance) -> Vec<String> {
    let mut args = Vec::with_capacity(4);
    if let Some(voice) = &utterance.voice {
        args.push("-v".to_string());
        args.push(voice.name.clone());
    }
    // Text starting with `-` must not read as a flag
    args.push("--".to_string());
    args.push(utterance.text.clone());
    args
}

/// Captures one utterance through an external program.
///
/// Invoked as `<command> --lang <locale>`; the first non-empty line the
/// program prints is the transcript.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    command: CommandLine,
}

impl CommandRecognizer {
    pub fn from_command_line(line: &str) -> Option<Self> {
        CommandLine::parse(line).map(|command| Self { command })
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn recognize(&self, locale: &str) -> Result<Option<String>, SpeechError> {
        tracing::debug!("Listening for speech in {}", locale);

        let output = self
            .command
            .command()
            .arg("--lang")
            .arg(locale)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Engine(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string))
    }
}

/// Plays pronunciation recordings through an external player such as `mpv`.
///
/// Invoked as `<command> <url>`.
#[derive(Debug, Clone)]
pub struct CommandAudioPlayer {
    command: CommandLine,
}

impl CommandAudioPlayer {
    pub fn from_command_line(line: &str) -> Option<Self> {
        CommandLine::parse(line).map(|command| Self { command })
    }
}

#[async_trait]
impl AudioPlayer for CommandAudioPlayer {
    async fn play(&self, url: &str) -> Result<(), SpeechError> {
        tracing::debug!("Playing pronunciation {}", url);

        let status = self
            .command
            .command()
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            return Err(SpeechError::Engine(format!(
                "{} exited with {}",
                self.command.program, status
            )));
        }
        Ok(())
    }
}
