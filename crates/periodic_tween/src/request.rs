//! # Deferred Transition Requests
//!
//! A transition can be requested from places that cannot borrow the
//! manager mutably: a render sink running inside `tick`, or a UI handler
//! holding only a cloned sender.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────────────┐
//! │ Render sink │─────>│   Request   │─────>│ TransitionManager   │
//! │ UI handler  │      │   Channel   │      │ (end of every tick) │
//! └─────────────┘      └─────────────┘      └─────────────────────┘
//! ```
//!
//! Requests are drained after the tick has finished iterating its tasks,
//! so the active set is never replaced mid-iteration. Only the latest
//! request is applied; earlier ones would be cancelled immediately anyway.

use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use periodic_shared::Transform;

/// A `transform_to` call waiting for the end of the current tick.
#[derive(Clone, Debug)]
pub struct TransitionRequest {
    /// Target transforms, index-aligned with the entities.
    pub targets: Arc<[Transform]>,
    /// Base duration in milliseconds.
    pub base_duration_ms: f64,
}

impl TransitionRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(targets: Arc<[Transform]>, base_duration_ms: f64) -> Self {
        Self {
            targets,
            base_duration_ms,
        }
    }
}

/// Cloneable sending half of the request channel.
#[derive(Clone, Debug)]
pub struct TransitionRequests {
    sender: Sender<TransitionRequest>,
}

impl TransitionRequests {
    /// Queues a request for the end of the next tick.
    ///
    /// Returns `false` if the queue is full or the manager is gone.
    pub fn submit(&self, request: TransitionRequest) -> bool {
        match self.sender.try_send(request) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("transition request queue full, request dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Bounded request channel owned by the manager.
#[derive(Debug)]
pub(crate) struct RequestQueue {
    requests: TransitionRequests,
    receiver: Receiver<TransitionRequest>,
}

impl RequestQueue {
    /// Creates a queue holding at most `capacity` pending requests.
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self {
            requests: TransitionRequests { sender },
            receiver,
        }
    }

    /// Sending half, for handing out.
    pub(crate) fn requests(&self) -> &TransitionRequests {
        &self.requests
    }

    /// Empties the queue, returning the most recent request.
    pub(crate) fn drain_latest(&self) -> Option<TransitionRequest> {
        self.receiver.try_iter().last()
    }
}
