//! # Slice Handles
//!
//! Type-safe handles for talking to a [`SliceActor`](crate::SliceActor).
//!
//! - [`SliceReader`] is cloneable and read-only. Views hold as many as they like.
//! - [`SliceWriter`] is not cloneable. Exactly one exists per slice and it is
//!   moved into the slice's [`SyncHook`](crate::SyncHook), so no two hooks can
//!   ever write the same slice.

use crate::error::StoreError;
use crate::message::SliceRequest;
use crate::slice::{Generation, Slice, WriteOutcome};
use tokio::sync::{mpsc, oneshot, watch};

/// Read access to one slice.
pub struct SliceReader<S: Slice> {
    sender: mpsc::Sender<SliceRequest<S>>,
}

impl<S: Slice> Clone for SliceReader<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: Slice> SliceReader<S> {
    pub(crate) fn new(sender: mpsc::Sender<SliceRequest<S>>) -> Self {
        Self { sender }
    }

    /// Returns the last-known value (or the empty default).
    pub async fn get(&self) -> Result<S::Value, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Get { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)
    }

    /// Returns a receiver that is notified after every applied write.
    pub async fn subscribe(&self) -> Result<watch::Receiver<S::Value>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Subscribe { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)
    }
}

/// Write access to one slice. Owned by a single hook.
pub struct SliceWriter<S: Slice> {
    sender: mpsc::Sender<SliceRequest<S>>,
}

impl<S: Slice> SliceWriter<S> {
    pub(crate) fn new(sender: mpsc::Sender<SliceRequest<S>>) -> Self {
        Self { sender }
    }

    /// Announces a new generation; writes stamped with older ones are discarded.
    pub async fn advance(&self, generation: Generation) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Advance {
                generation,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)
    }

    /// Overwrites the slice if `generation` is still current.
    pub async fn replace(
        &self,
        generation: Generation,
        value: S::Value,
    ) -> Result<WriteOutcome, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SliceRequest::Replace {
                generation,
                value,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)
    }
}
