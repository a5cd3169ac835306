//! # Search Handle
//!
//! Cloneable front door to the search actor. Commands are answered as soon as
//! the actor has applied them; the outcome of a search arrives later through
//! [`SearchHandle::subscribe`] and [`SearchHandle::notices`].

use super::error::SearchError;
use super::message::{SearchCommand, SessionId};
use super::state::{Notice, SearchView};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SearchHandle {
    sender: mpsc::Sender<SearchCommand>,
    view: watch::Receiver<SearchView>,
    notices: broadcast::Sender<Notice>,
}

impl SearchHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<SearchCommand>,
        view: watch::Receiver<SearchView>,
        notices: broadcast::Sender<Notice>,
    ) -> Self {
        Self {
            sender,
            view,
            notices,
        }
    }

    /// Submits text from the search box.
    #[instrument(skip(self, text))]
    pub async fn manual_submit(&self, text: impl Into<String>) -> Result<SessionId, SearchError> {
        let text = text.into();
        debug!(%text, "Sending request");
        self.request(|respond_to| SearchCommand::ManualSubmit { text, respond_to })
            .await?
    }

    /// Starts a new session from any state.
    #[instrument(skip(self, query))]
    pub async fn submit(&self, query: impl Into<String>) -> Result<SessionId, SearchError> {
        let query = query.into();
        debug!(%query, "Sending request");
        self.request(|respond_to| SearchCommand::Submit { query, respond_to })
            .await?
    }

    #[instrument(skip(self))]
    pub async fn voice_start(&self) -> Result<SessionId, SearchError> {
        debug!("Sending request");
        self.request(|respond_to| SearchCommand::VoiceStart { respond_to })
            .await?
    }

    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), SearchError> {
        self.request(|respond_to| SearchCommand::Reset { respond_to })
            .await
    }

    /// The current view.
    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// A receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.clone()
    }

    /// Notices raised from now on.
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Waits until no session is listening or searching, and returns that view.
    pub async fn settled(&self) -> Result<SearchView, SearchError> {
        let mut view = self.view.clone();
        let settled = view
            .wait_for(|v| !v.phase.is_busy())
            .await
            .map_err(|_| SearchError::ActorDropped)?;
        Ok(settled.clone())
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SearchCommand,
    ) -> Result<T, SearchError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(command(respond_to))
            .await
            .map_err(|_| SearchError::ActorClosed)?;
        response.await.map_err(|_| SearchError::ActorDropped)
    }
}
