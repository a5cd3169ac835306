use thiserror::Error;

/// Why a capture could not start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Speech recognition is not available on this device")]
    UnsupportedCapability,
    #[error("A capture session is already listening")]
    AlreadyListening,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("Speech platform error: {0}")]
    Platform(String),
}
