//! The search actor.
//!
//! Like the slice actors, it owns its state outright and handles one message
//! at a time: user commands from handles, and completions from the capture and
//! fetch tasks it spawned. Nothing here awaits the network or the microphone;
//! those run in their own tasks and report back through the event channel.

use super::error::SearchError;
use super::handle::SearchHandle;
use super::message::{SearchCommand, SearchEvent, SessionId};
use super::state::{Notice, NoticeLevel, SearchPhase, SearchView};
use crate::clients::SearchClient;
use crate::model::Course;
use crate::speech::{CaptureError, CaptureState, RecognitionEvent, SpeechCapture, SpeechPlayback};
use store_sync::ResourceResult;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn, Instrument};

pub const EMPTY_INPUT: &str = "Please enter something to search";
pub const VOICE_UNSUPPORTED: &str = "Voice search not supported on this device";
pub const VOICE_BUSY: &str = "Voice search is already listening";
pub const NOT_RECOGNIZED: &str = "Could not recognize speech. Please try again.";
pub const NO_RESULTS: &str = "No courses found. Try different keywords.";
pub const NO_RESULTS_SPOKEN: &str = "No courses found for your query";

const NOTICE_CAPACITY: usize = 16;

pub struct SearchOrchestrator {
    commands: mpsc::Receiver<SearchCommand>,
    events: mpsc::UnboundedReceiver<SearchEvent>,
    reporter: mpsc::UnboundedSender<SearchEvent>,
    search: SearchClient,
    capture: SpeechCapture,
    playback: SpeechPlayback,
    view: watch::Sender<SearchView>,
    notices: broadcast::Sender<Notice>,
    session: SessionId,
    /// The open capture window, if any.
    listening: Option<ActiveCapture>,
}

struct ActiveCapture {
    session: SessionId,
    task: JoinHandle<()>,
}

/// Creates the search actor and its handle. Drive the actor with `.run()`.
pub fn new(
    search: SearchClient,
    capture: SpeechCapture,
    playback: SpeechPlayback,
    buffer_size: usize,
) -> (SearchOrchestrator, SearchHandle) {
    let (sender, commands) = mpsc::channel(buffer_size);
    let (reporter, events) = mpsc::unbounded_channel();
    let (view, view_rx) = watch::channel(SearchView::default());
    let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

    let handle = SearchHandle::new(sender, view_rx, notices.clone());
    let actor = SearchOrchestrator {
        commands,
        events,
        reporter,
        search,
        capture,
        playback,
        view,
        notices,
        session: SessionId::default(),
        listening: None,
    };
    (actor, handle)
}

impl SearchOrchestrator {
    /// Runs until every [`SearchHandle`] has been dropped.
    pub async fn run(mut self) {
        info!("Search orchestrator started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = self.events.recv() => self.handle_event(event),
            }
        }

        self.cancel_capture();
        info!(session = %self.session, "Shutdown");
    }

    fn handle_command(&mut self, command: SearchCommand) {
        match command {
            SearchCommand::ManualSubmit { text, respond_to } => {
                let result = if self.phase().is_busy() {
                    debug!(phase = ?self.phase(), "Manual submit while busy");
                    Err(SearchError::Busy)
                } else {
                    self.submit(&text)
                };
                let _ = respond_to.send(result);
            }
            SearchCommand::Submit { query, respond_to } => {
                let _ = respond_to.send(self.submit(&query));
            }
            SearchCommand::VoiceStart { respond_to } => {
                let _ = respond_to.send(self.voice_start());
            }
            SearchCommand::Reset { respond_to } => {
                self.cancel_capture();
                self.session = self.session.next();
                info!(session = %self.session, "Session reset");
                self.view.send_replace(SearchView::default());
                let _ = respond_to.send(());
            }
        }
    }

    fn handle_event(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::CaptureFinished { session, event } => {
                self.capture_finished(session, event)
            }
            SearchEvent::SearchFinished { session, result } => {
                self.search_finished(session, result)
            }
        }
    }

    fn phase(&self) -> SearchPhase {
        self.view.borrow().phase
    }

    fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        // No receivers is fine: nobody is showing notices.
        let _ = self.notices.send(Notice::new(level, message));
    }

    fn submit(&mut self, text: &str) -> Result<SessionId, SearchError> {
        let query = text.trim();
        if query.is_empty() {
            self.notify(NoticeLevel::Warning, EMPTY_INPUT);
            return Err(SearchError::EmptyInput);
        }
        self.cancel_capture();
        self.session = self.session.next();
        self.start_search(query.to_string());
        Ok(self.session)
    }

    fn voice_start(&mut self) -> Result<SessionId, SearchError> {
        if self.phase() == SearchPhase::Searching {
            return Err(SearchError::Busy);
        }
        let pending = match self.capture.start() {
            Ok(pending) => pending,
            Err(e) => {
                let message = match e {
                    CaptureError::UnsupportedCapability => VOICE_UNSUPPORTED,
                    CaptureError::AlreadyListening => VOICE_BUSY,
                };
                self.notify(NoticeLevel::Error, message);
                return Err(e.into());
            }
        };

        self.session = self.session.next();
        let session = self.session;
        self.view.send_replace(SearchView {
            phase: SearchPhase::Listening,
            ..SearchView::default()
        });
        info!(%session, "Voice capture started");

        let reporter = self.reporter.clone();
        let task = tokio::spawn(
            async move {
                let event = pending.await;
                let _ = reporter.send(SearchEvent::CaptureFinished { session, event });
            }
            .in_current_span(),
        );
        self.listening = Some(ActiveCapture { session, task });
        Ok(session)
    }

    /// Closes the open capture window and frees the controller.
    fn cancel_capture(&mut self) {
        if let Some(active) = self.listening.take() {
            active.task.abort();
            self.capture.reset();
            info!(session = %active.session, "Voice capture cancelled");
        }
    }

    fn capture_finished(&mut self, session: SessionId, event: RecognitionEvent) {
        // A cancelled window may still have queued its completion.
        if self.listening.as_ref().map(|active| active.session) != Some(session) {
            debug!(%session, current = %self.session, "Discarded stale capture");
            return;
        }
        self.listening = None;

        let state = self.capture.complete(event);
        self.capture.reset();

        match state {
            CaptureState::Resolved(transcript) => {
                info!(%session, %transcript, "Transcript received");
                self.start_search(transcript);
            }
            CaptureState::Errored(_) => {
                self.notify(NoticeLevel::Error, NOT_RECOGNIZED);
                self.view.send_replace(SearchView::default());
            }
            CaptureState::Idle | CaptureState::Listening => {
                debug!(%session, "Capture ended without result");
                self.view.send_replace(SearchView::default());
            }
        }
    }

    /// Moves the current session to `Searching` and spawns the fetch.
    fn start_search(&mut self, query: String) {
        let session = self.session;
        self.view.send_replace(SearchView {
            phase: SearchPhase::Searching,
            query: query.clone(),
            results: Vec::new(),
        });
        info!(%session, %query, "Searching");

        let search = self.search.clone();
        let reporter = self.reporter.clone();
        tokio::spawn(
            async move {
                let result = search.search(&query).await;
                let _ = reporter.send(SearchEvent::SearchFinished { session, result });
            }
            .in_current_span(),
        );
    }

    fn search_finished(&mut self, session: SessionId, result: ResourceResult<Vec<Course>>) {
        if session != self.session {
            info!(%session, current = %self.session, "Discarded stale search result");
            return;
        }

        let query = self.view.borrow().query.clone();
        let view = match result {
            ResourceResult::Success { data } if data.is_empty() => {
                self.playback.speak(NO_RESULTS_SPOKEN);
                self.notify(NoticeLevel::Info, NO_RESULTS);
                SearchView {
                    phase: SearchPhase::Empty,
                    query,
                    results: data,
                }
            }
            ResourceResult::Success { data } => {
                let n = data.len();
                self.playback.speak(&format!("Found {n} courses for you"));
                self.notify(NoticeLevel::Success, format!("Found {n} courses"));
                SearchView {
                    phase: SearchPhase::Results(n),
                    query,
                    results: data,
                }
            }
            ResourceResult::Error { message } => {
                warn!(%session, %message, "Search failed");
                self.notify(NoticeLevel::Error, message);
                SearchView {
                    phase: SearchPhase::Failed,
                    query,
                    results: Vec::new(),
                }
            }
        };
        info!(%session, phase = ?view.phase, "Search settled");
        self.view.send_replace(view);
    }
}
