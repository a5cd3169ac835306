use crate::speech::CaptureError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("Please enter something to search")]
    EmptyInput,

    #[error("A search is already in progress")]
    Busy,

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Search actor closed")]
    ActorClosed,

    #[error("Search actor dropped response channel")]
    ActorDropped,
}
