//! # Slice Messages
//!
//! Message types exchanged between the slice handles and the [`SliceActor`](crate::SliceActor).

use crate::slice::{Generation, Slice, WriteOutcome};
use tokio::sync::{oneshot, watch};

/// Type alias for the one-shot response channel used by slice actors.
pub type Response<T> = oneshot::Sender<T>;

/// Requests a slice actor understands.
///
/// - **Get**: read the current value.
/// - **Subscribe**: obtain a `watch` receiver that observes every accepted write.
/// - **Advance**: move the accepted generation forward; earlier in-flight writes become stale.
/// - **Replace**: overwrite the value, if the write's generation is current.
#[derive(Debug)]
pub enum SliceRequest<S: Slice> {
    Get {
        respond_to: Response<S::Value>,
    },
    Subscribe {
        respond_to: Response<watch::Receiver<S::Value>>,
    },
    Advance {
        generation: Generation,
        respond_to: Response<()>,
    },
    Replace {
        generation: Generation,
        value: S::Value,
        respond_to: Response<WriteOutcome>,
    },
}
