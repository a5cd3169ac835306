//! Terminal stand-ins for the speech platform, used by the CLI.

use super::capture::{AudioCue, RecognitionConfig, RecognitionEvent, SpeechRecognizer};
use super::error::SpeechError;
use super::playback::{SpeechSynthesizer, Utterance};
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// "Recognizes" one line typed on stdin. EOF closes the window without a result.
pub struct ConsoleRecognizer {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleRecognizer {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for ConsoleRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRecognizer for ConsoleRecognizer {
    async fn listen(&self, config: RecognitionConfig) -> RecognitionEvent {
        eprint!("[{}] speak now> ", config.lang);
        let _ = std::io::stderr().flush();
        match self.lines.lock().await.next_line().await {
            Ok(Some(line)) => RecognitionEvent::Transcript(line),
            Ok(None) => RecognitionEvent::End,
            Err(e) => RecognitionEvent::Error(e.to_string()),
        }
    }
}

/// Prints utterances to stdout.
pub struct ConsoleSynthesizer;

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "(speaking) {}", utterance.text)
            .map_err(|e| SpeechError::Platform(e.to_string()))
    }
}

/// Terminal bell.
pub struct BellCue;

impl AudioCue for BellCue {
    fn play(&self) {
        let mut err = std::io::stderr().lock();
        let _ = err.write_all(b"\x07");
        let _ = err.flush();
    }
}
