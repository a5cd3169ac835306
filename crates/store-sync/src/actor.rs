//! # Slice Actor
//!
//! This module defines the `SliceActor`, the task that owns one store slice.
//! It implements the "Server" side of the Actor Model: requests are processed
//! sequentially, so the value and its generation need no locks.

use crate::client::{SliceReader, SliceWriter};
use crate::message::SliceRequest;
use crate::slice::{Generation, Slice, WriteOutcome};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// The actor that owns a single slice of the store.
///
/// # Architecture Note
/// The value lives inside a `watch` channel owned by the actor. Readers can
/// poll it with [`SliceReader::get`] or subscribe to changes; only the actor
/// ever writes to it.
///
/// **Write policy**: a `Replace` is applied only when its generation equals the
/// latest generation announced through `Advance`. The owning hook advances the
/// generation before each fetch, so a late completion from a superseded fetch
/// is discarded instead of overwriting newer state. The HTTP call itself is
/// not cancelled.
pub struct SliceActor<S: Slice> {
    receiver: mpsc::Receiver<SliceRequest<S>>,
    publisher: watch::Sender<S::Value>,
    current: Generation,
}

/// Creates a slice actor initialized to [`Slice::empty`], plus its handles.
///
/// # Returns
///
/// 1. The `SliceActor`, which must be driven with `.run()`.
/// 2. A cloneable [`SliceReader`] for views.
/// 3. The single [`SliceWriter`], to be moved into the slice's owning hook.
pub fn slice<S: Slice>(buffer_size: usize) -> (SliceActor<S>, SliceReader<S>, SliceWriter<S>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (publisher, _) = watch::channel(S::empty());
    let actor = SliceActor {
        receiver,
        publisher,
        current: Generation::default(),
    };
    (
        actor,
        SliceReader::new(sender.clone()),
        SliceWriter::new(sender),
    )
}

impl<S: Slice> SliceActor<S> {
    /// Runs the actor's event loop until every handle has been dropped.
    pub async fn run(mut self) {
        let slice = S::NAME;
        info!(slice, "Slice actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SliceRequest::Get { respond_to } => {
                    debug!(slice, "Get");
                    let _ = respond_to.send(self.publisher.borrow().clone());
                }
                SliceRequest::Subscribe { respond_to } => {
                    debug!(slice, "Subscribe");
                    let _ = respond_to.send(self.publisher.subscribe());
                }
                SliceRequest::Advance {
                    generation,
                    respond_to,
                } => {
                    if generation > self.current {
                        self.current = generation;
                    }
                    debug!(slice, %generation, "Advance");
                    let _ = respond_to.send(());
                }
                SliceRequest::Replace {
                    generation,
                    value,
                    respond_to,
                } => {
                    let outcome = if generation == self.current {
                        debug!(slice, %generation, ?value, "Replace");
                        self.publisher.send_replace(value);
                        info!(slice, %generation, "Replaced");
                        WriteOutcome::Applied
                    } else {
                        info!(slice, %generation, current = %self.current, "Discarded stale write");
                        WriteOutcome::Discarded
                    };
                    let _ = respond_to.send(outcome);
                }
            }
        }

        info!(slice, generation = %self.current, "Shutdown");
    }
}
