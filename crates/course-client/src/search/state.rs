use crate::model::Course;

/// UI-facing phase of the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Listening,
    Searching,
    Results(usize),
    Empty,
    Failed,
}

impl SearchPhase {
    /// Listening or searching: a session is in progress.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Listening | Self::Searching)
    }
}

/// Everything a view needs to render the search panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    pub phase: SearchPhase,
    pub query: String,
    pub results: Vec<Course>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}
