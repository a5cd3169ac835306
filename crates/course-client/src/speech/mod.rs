//! # Speech
//!
//! Speech recognition and synthesis are environment capabilities: a device may
//! or may not offer them. Both are modelled as injectable traits wrapped in a
//! [`Capability`], so the search flow and its tests never depend on a live
//! platform.
//!
//! - [`SpeechCapture`]: single-shot, cancel-by-supersede recognition.
//! - [`SpeechPlayback`]: fire-and-forget utterances; silently absent when unsupported.

pub mod capability;
pub mod capture;
pub mod console;
pub mod error;
pub mod mock;
pub mod playback;

pub use capability::Capability;
pub use capture::{
    AudioCue, CaptureState, PendingCapture, RecognitionConfig, RecognitionEvent, SpeechCapture,
    SpeechRecognizer,
};
pub use console::{BellCue, ConsoleRecognizer, ConsoleSynthesizer};
pub use error::{CaptureError, SpeechError};
pub use playback::{SpeechPlayback, SpeechSynthesizer, Utterance};

use std::sync::Arc;

/// The speech capabilities of the host.
#[derive(Clone)]
pub struct SpeechPlatform {
    pub recognizer: Capability<dyn SpeechRecognizer>,
    pub synthesizer: Capability<dyn SpeechSynthesizer>,
    pub cue: Option<Arc<dyn AudioCue>>,
}

impl SpeechPlatform {
    /// A host with no speech support at all.
    pub fn unavailable() -> Self {
        Self {
            recognizer: Capability::Unavailable,
            synthesizer: Capability::Unavailable,
            cue: None,
        }
    }

    /// Terminal stand-ins: stdin for recognition, stdout for synthesis.
    pub fn console() -> Self {
        Self {
            recognizer: Capability::Available(Arc::new(ConsoleRecognizer::new())),
            synthesizer: Capability::Available(Arc::new(ConsoleSynthesizer)),
            cue: Some(Arc::new(BellCue)),
        }
    }
}
