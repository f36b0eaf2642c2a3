//! Error types for backstep.
//!
//! Dispatcher operations are total and never fail. Errors only surface from
//! the strict lifecycle API, where a transition can be rejected.

use crate::lifecycle::{LifecycleEvent, LifecycleState};
use thiserror::Error;

/// Errors raised when a lifecycle transition is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// The lifecycle already reached its terminal state.
    #[error("lifecycle is destroyed; cannot handle {event:?}")]
    Destroyed {
        /// The rejected event.
        event: LifecycleEvent,
    },

    /// The event does not leave the current state.
    #[error("cannot handle {event:?} while {from:?}")]
    InvalidTransition {
        /// The rejected event.
        event: LifecycleEvent,
        /// The state the lifecycle was in.
        from: LifecycleState,
    },
}
