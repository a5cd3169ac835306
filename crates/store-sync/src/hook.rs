//! # Store Sync Hook
//!
//! Keeps one slice consistent with server state while a view is mounted.
//!
//! ## Lifecycle
//!
//! | Call | Effect |
//! |------|--------|
//! | [`activate`](SyncHook::activate) | Evaluate the trigger. Unmet: no call. Same as last time: no call. Otherwise start one fetch. |
//! | [`refresh`](SyncHook::refresh) | Re-run the last trigger, even if unchanged. |
//! | [`deactivate`](SyncHook::deactivate) | Forget the trigger and supersede any in-flight fetch. The slice keeps its value. |
//!
//! Every completed fetch performs exactly one slice write: the payload on
//! success, [`Slice::empty`] on failure. A fetch superseded by a newer
//! activation still runs to completion, but its write is discarded by the
//! slice actor (see [`SliceActor`](crate::SliceActor)).

use crate::client::SliceWriter;
use crate::error::StoreError;
use crate::fetch::ResourceFetcher;
use crate::result::ResourceResult;
use crate::slice::{Generation, Slice, WriteOutcome};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn, Instrument};

/// Result of evaluating a trigger.
#[derive(Debug)]
pub enum SyncStatus {
    /// Trigger unmet: no network call, slice untouched.
    Skipped,
    /// Same trigger as the previous activation: nothing to do.
    Unchanged,
    /// A fetch was started.
    Started(SyncTask),
}

impl SyncStatus {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(_))
    }

    /// The spawned fetch, if any.
    pub fn into_task(self) -> Option<SyncTask> {
        match self {
            Self::Started(task) => Some(task),
            _ => None,
        }
    }
}

/// Handle to an in-flight fetch-and-write.
#[derive(Debug)]
pub struct SyncTask {
    generation: Generation,
    handle: JoinHandle<Result<WriteOutcome, StoreError>>,
}

impl SyncTask {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Waits for the fetch to complete and its write to be applied or discarded.
    pub async fn finished(self) -> Result<WriteOutcome, StoreError> {
        self.handle
            .await
            .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}

/// Owns the writer of one slice and re-fetches it when its trigger changes.
pub struct SyncHook<S: Slice> {
    fetcher: Arc<dyn ResourceFetcher>,
    writer: Arc<SliceWriter<S>>,
    trigger: Option<S::Trigger>,
    generation: Generation,
}

impl<S: Slice> SyncHook<S> {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, writer: SliceWriter<S>) -> Self {
        Self {
            fetcher,
            writer: Arc::new(writer),
            trigger: None,
            generation: Generation::default(),
        }
    }

    /// The trigger of the last activation, if the hook is active.
    pub fn trigger(&self) -> Option<&S::Trigger> {
        self.trigger.as_ref()
    }

    /// Evaluates `trigger` and starts a fetch if it is met and has changed.
    #[instrument(skip(self), fields(slice = S::NAME))]
    pub async fn activate(&mut self, trigger: S::Trigger) -> Result<SyncStatus, StoreError> {
        if self.trigger.as_ref() == Some(&trigger) {
            debug!("Trigger unchanged");
            return Ok(SyncStatus::Unchanged);
        }
        self.trigger = Some(trigger.clone());
        self.run(&trigger).await
    }

    /// Re-runs the fetch for the current trigger.
    #[instrument(skip(self), fields(slice = S::NAME))]
    pub async fn refresh(&mut self) -> Result<SyncStatus, StoreError> {
        match self.trigger.clone() {
            Some(trigger) => self.run(&trigger).await,
            None => {
                debug!("Refresh on inactive hook");
                Ok(SyncStatus::Skipped)
            }
        }
    }

    /// Forgets the trigger. Any in-flight completion will be discarded.
    #[instrument(skip(self), fields(slice = S::NAME))]
    pub async fn deactivate(&mut self) -> Result<(), StoreError> {
        self.trigger = None;
        self.generation = self.generation.next();
        self.writer.advance(self.generation).await?;
        info!(generation = %self.generation, "Deactivated");
        Ok(())
    }

    async fn run(&mut self, trigger: &S::Trigger) -> Result<SyncStatus, StoreError> {
        self.generation = self.generation.next();
        let generation = self.generation;
        self.writer.advance(generation).await?;

        let Some(request) = S::request(trigger) else {
            debug!(?trigger, "Trigger unmet, skipping fetch");
            return Ok(SyncStatus::Skipped);
        };

        info!(%generation, %request, "Sync started");
        let fetcher = Arc::clone(&self.fetcher);
        let writer = Arc::clone(&self.writer);
        let handle = tokio::spawn(
            async move {
                let value = match S::decode(fetcher.fetch(request).await) {
                    ResourceResult::Success { data } => data,
                    ResourceResult::Error { message } => {
                        warn!(%message, "Sync failed, clearing slice");
                        S::empty()
                    }
                };
                writer.replace(generation, value).await
            }
            .in_current_span(),
        );

        Ok(SyncStatus::Started(SyncTask { generation, handle }))
    }
}
