//! Messages exchanged with the search actor.

use super::error::SearchError;
use crate::model::Course;
use crate::speech::RecognitionEvent;
use std::fmt::{Display, Formatter};
use store_sync::{ResourceResult, Response};

/// Monotonically increasing id of a search session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

/// Requests from [`SearchHandle`](super::SearchHandle)s.
#[derive(Debug)]
pub enum SearchCommand {
    /// Text typed into the search box. Rejected while a session is in progress.
    ManualSubmit {
        text: String,
        respond_to: Response<Result<SessionId, SearchError>>,
    },
    /// Starts a new session from any state, abandoning the current one.
    Submit {
        query: String,
        respond_to: Response<Result<SessionId, SearchError>>,
    },
    VoiceStart {
        respond_to: Response<Result<SessionId, SearchError>>,
    },
    /// Destroys the session and returns to `Idle`.
    Reset { respond_to: Response<()> },
}

/// Completions reported back by tasks the actor spawned.
#[derive(Debug)]
pub(crate) enum SearchEvent {
    CaptureFinished {
        session: SessionId,
        event: RecognitionEvent,
    },
    SearchFinished {
        session: SessionId,
        result: ResourceResult<Vec<Course>>,
    },
}
