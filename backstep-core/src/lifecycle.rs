//! # Lifecycle Contract
//!
//! The observable state machine that gates lifecycle-bound callbacks.
//!
//! backstep never drives a lifecycle itself. It only reads the current state
//! and subscribes to transitions, so any implementation of [`Lifecycle`] can
//! stand in, including a test double.
//!
//! # Ordering
//!
//! States are totally ordered:
//!
//! ```text
//! Destroyed < Initialized < Created < Started < Resumed
//! ```
//!
//! A stopped owner reports [`LifecycleState::Created`].

use crate::cancellable::Subscription;
use std::rc::Rc;

/// The state of a lifecycle owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleState {
    /// Terminal state. No further transitions are expected.
    Destroyed,
    /// Constructed but not yet created.
    Initialized,
    /// Created, or stopped after having been started.
    Created,
    /// Visible to the user.
    Started,
    /// In the foreground and interactive.
    Resumed,
}

impl LifecycleState {
    /// Check whether this state is at or above `other`.
    pub fn is_at_least(self, other: LifecycleState) -> bool {
        self >= other
    }

    /// Check whether this is the terminal state.
    pub fn is_destroyed(self) -> bool {
        self == LifecycleState::Destroyed
    }
}

/// A transition reported by a lifecycle owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// `Initialized -> Created`.
    Create,
    /// `Created -> Started`.
    Start,
    /// `Started -> Resumed`.
    Resume,
    /// `Resumed -> Started`.
    Pause,
    /// `Started -> Created`.
    Stop,
    /// `Created -> Destroyed`.
    Destroy,
}

impl LifecycleEvent {
    /// The state a lifecycle is in after handling this event.
    pub fn target_state(self) -> LifecycleState {
        match self {
            LifecycleEvent::Create | LifecycleEvent::Stop => LifecycleState::Created,
            LifecycleEvent::Start | LifecycleEvent::Pause => LifecycleState::Started,
            LifecycleEvent::Resume => LifecycleState::Resumed,
            LifecycleEvent::Destroy => LifecycleState::Destroyed,
        }
    }

    /// The state this event legally leaves.
    pub fn source_state(self) -> LifecycleState {
        match self {
            LifecycleEvent::Create => LifecycleState::Initialized,
            LifecycleEvent::Start | LifecycleEvent::Destroy => LifecycleState::Created,
            LifecycleEvent::Resume | LifecycleEvent::Stop => LifecycleState::Started,
            LifecycleEvent::Pause => LifecycleState::Resumed,
        }
    }
}

/// Receives lifecycle transitions.
///
/// Notifications are delivered synchronously, in the order they occur, on the
/// thread that owns the lifecycle.
pub trait LifecycleObserver: 'static {
    /// Called after the lifecycle moved to `state`.
    fn on_state_changed(&self, state: LifecycleState);
}

impl<F> LifecycleObserver for F
where
    F: Fn(LifecycleState) + 'static,
{
    fn on_state_changed(&self, state: LifecycleState) {
        (self)(state)
    }
}

/// An observable lifecycle.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an observable `Lifecycle`",
    label = "missing `Lifecycle` implementation",
    note = "Implement `current_state` and `observe` to let callbacks bind to this type."
)]
pub trait Lifecycle {
    /// Report the current state.
    fn current_state(&self) -> LifecycleState;

    /// Subscribe to transitions until the returned subscription is cancelled.
    fn observe(&self, observer: Rc<dyn LifecycleObserver>) -> Subscription;
}

/// An object that exposes a [`Lifecycle`].
pub trait LifecycleOwner {
    /// Get the owner's lifecycle.
    fn lifecycle(&self) -> &dyn Lifecycle;
}
