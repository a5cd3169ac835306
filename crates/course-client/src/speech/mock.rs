//! # Speech Test Doubles
//!
//! | Double | Behavior |
//! |--------|----------|
//! | [`ScriptedRecognizer::new`] | Each `listen` pops the next scripted event; `End` when exhausted. |
//! | [`ScriptedRecognizer::gated`] | Each `listen` waits for the test to send the event. |
//! | [`RecordingSynthesizer`] | Records every utterance, or fails every call. |
//! | [`CountingCue`] | Counts cue plays. |

use super::capture::{AudioCue, RecognitionConfig, RecognitionEvent, SpeechRecognizer};
use super::error::SpeechError;
use super::playback::{SpeechSynthesizer, Utterance};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

pub struct ScriptedRecognizer {
    events: tokio::sync::Mutex<mpsc::UnboundedReceiver<RecognitionEvent>>,
    configs: Mutex<Vec<RecognitionConfig>>,
}

impl ScriptedRecognizer {
    /// Replays `events` in order.
    pub fn new(events: Vec<RecognitionEvent>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        for event in events {
            let _ = sender.send(event);
        }
        Self::from_receiver(receiver)
    }

    /// Returns a recognizer whose capture windows stay open until the test
    /// sends the closing event.
    pub fn gated() -> (Self, mpsc::UnboundedSender<RecognitionEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::from_receiver(receiver), sender)
    }

    fn from_receiver(receiver: mpsc::UnboundedReceiver<RecognitionEvent>) -> Self {
        Self {
            events: tokio::sync::Mutex::new(receiver),
            configs: Mutex::new(Vec::new()),
        }
    }

    pub fn listen_count(&self) -> usize {
        self.configs.lock().unwrap().len()
    }

    /// The configuration of every capture opened so far.
    pub fn configs(&self) -> Vec<RecognitionConfig> {
        self.configs.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn listen(&self, config: RecognitionConfig) -> RecognitionEvent {
        self.configs.lock().unwrap().push(config);
        self.events
            .lock()
            .await
            .recv()
            .await
            .unwrap_or(RecognitionEvent::End)
    }
}

#[derive(Default)]
pub struct RecordingSynthesizer {
    spoken: Mutex<Vec<Utterance>>,
    fail: bool,
}

impl RecordingSynthesizer {
    pub fn failing() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn spoken(&self) -> Vec<Utterance> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.spoken().into_iter().map(|u| u.text).collect()
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        if self.fail {
            return Err(SpeechError::Platform("synthesis-failed".into()));
        }
        self.spoken.lock().unwrap().push(utterance);
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingCue {
    plays: AtomicUsize,
}

impl CountingCue {
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AudioCue for CountingCue {
    fn play(&self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}
