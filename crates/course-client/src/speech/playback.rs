//! # Speech Playback Controller
//!
//! Fire-and-forget announcements. Playback is a UX nicety, so a missing or
//! failing synthesizer is never reported to the caller.

use super::capability::Capability;
use super::error::SpeechError;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Platform speech-synthesis capability. Must not block on the utterance.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;
}

#[derive(Clone)]
pub struct SpeechPlayback {
    synthesizer: Capability<dyn SpeechSynthesizer>,
}

impl SpeechPlayback {
    pub fn new(synthesizer: Capability<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    pub fn speak(&self, text: &str) {
        let Some(synthesizer) = self.synthesizer.get() else {
            debug!("Speech synthesis unavailable, skipping");
            return;
        };
        if let Err(e) = synthesizer.speak(Utterance::new(text)) {
            warn!(error = %e, "Playback failed");
        }
    }
}
