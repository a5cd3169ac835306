//! # Speech Capture Controller
//!
//! Wraps the platform recognizer into a single-shot operation.
//!
//! ```text
//! Idle --start()--> Listening --Transcript--> Resolved(text)
//!                             --Error-------> Errored(reason)
//!                             --End---------> Idle
//! Resolved | Errored --reset()--> Idle
//! ```
//!
//! [`SpeechCapture::start`] hands back the pending capture as a future instead
//! of awaiting it, so the owner can keep processing other input while the
//! capture window is open and feed the outcome back through
//! [`SpeechCapture::complete`].

use super::capability::Capability;
use super::error::CaptureError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Recognition settings handed to the platform on every capture.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionConfig {
    pub lang: String,
    pub continuous: bool,
    pub interim_results: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// What the platform reports when a capture window closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// One recognized utterance.
    Transcript(String),
    /// The platform failed to capture or recognize.
    Error(String),
    /// The window closed without a result (silence, timeout).
    End,
}

/// Platform speech-recognition capability.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Opens one capture window and resolves when it closes.
    async fn listen(&self, config: RecognitionConfig) -> RecognitionEvent;
}

/// Short audible cue played when listening begins.
pub trait AudioCue: Send + Sync {
    fn play(&self);
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Listening,
    Resolved(String),
    Errored(String),
}

/// An open capture window.
pub type PendingCapture = BoxFuture<'static, RecognitionEvent>;

pub struct SpeechCapture {
    recognizer: Capability<dyn SpeechRecognizer>,
    cue: Option<Arc<dyn AudioCue>>,
    config: RecognitionConfig,
    state: CaptureState,
}

impl SpeechCapture {
    pub fn new(recognizer: Capability<dyn SpeechRecognizer>, config: RecognitionConfig) -> Self {
        Self {
            recognizer,
            cue: None,
            config,
            state: CaptureState::Idle,
        }
    }

    pub fn with_cue(mut self, cue: Arc<dyn AudioCue>) -> Self {
        self.cue = Some(cue);
        self
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == CaptureState::Listening
    }

    /// Begins a capture and plays the start cue.
    ///
    /// Fails without changing state when recognition is unavailable or a
    /// capture is already open.
    pub fn start(&mut self) -> Result<PendingCapture, CaptureError> {
        let Some(recognizer) = self.recognizer.get().cloned() else {
            warn!("Speech recognition unavailable");
            return Err(CaptureError::UnsupportedCapability);
        };
        if self.is_listening() {
            warn!("Capture already listening");
            return Err(CaptureError::AlreadyListening);
        }

        self.state = CaptureState::Listening;
        if let Some(cue) = &self.cue {
            cue.play();
        }
        info!(lang = %self.config.lang, "Listening");

        let config = self.config.clone();
        Ok(async move { recognizer.listen(config).await }.boxed())
    }

    /// Applies the outcome of the open capture window and returns the new state.
    pub fn complete(&mut self, event: RecognitionEvent) -> CaptureState {
        self.state = match event {
            RecognitionEvent::Transcript(text) => {
                let text = text.trim();
                if text.is_empty() {
                    debug!("Blank transcript, treating as end");
                    CaptureState::Idle
                } else {
                    CaptureState::Resolved(text.to_string())
                }
            }
            RecognitionEvent::Error(reason) => {
                warn!(%reason, "Capture failed");
                CaptureState::Errored(reason)
            }
            RecognitionEvent::End => CaptureState::Idle,
        };
        debug!(state = ?self.state, "Capture completed");
        self.state.clone()
    }

    pub fn reset(&mut self) {
        self.state = CaptureState::Idle;
    }
}
