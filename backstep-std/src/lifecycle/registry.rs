//! Observable lifecycle with multiple observers.

use backstep_core::{
    Lifecycle, LifecycleError, LifecycleEvent, LifecycleObserver, LifecycleOwner, LifecycleState,
    Subscription,
};
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

type ObserverId = u64;

struct RegistryInner {
    state: Cell<LifecycleState>,
    last_event: Cell<Option<LifecycleEvent>>,
    observers: RefCell<Vec<(ObserverId, Rc<dyn LifecycleObserver>)>>,
    next_id: Cell<ObserverId>,
}

impl RegistryInner {
    fn remove_observer(&self, id: ObserverId) {
        self.observers.borrow_mut().retain(|(oid, _)| *oid != id);
    }

    fn is_observing(&self, id: ObserverId) -> bool {
        self.observers.borrow().iter().any(|(oid, _)| *oid == id)
    }
}

/// A [`Lifecycle`] that can handle multiple observers.
///
/// Owners drive it with [`handle_lifecycle_event`](Self::handle_lifecycle_event)
/// and hand it to anything that needs to observe them. It is a shared handle:
/// clones drive and observe the same state.
///
/// # Notification rounds
///
/// Observers are notified synchronously, in registration order. An observer
/// added during a round is first notified on the next one. An observer
/// removed during a round is skipped if its turn has not come yet.
#[derive(Clone)]
pub struct LifecycleRegistry {
    inner: Rc<RegistryInner>,
}

impl LifecycleRegistry {
    /// Create a registry in the [`Initialized`](LifecycleState::Initialized) state.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RegistryInner {
                state: Cell::new(LifecycleState::Initialized),
                last_event: Cell::new(None),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Move to the state after `event` and notify observers.
    ///
    /// Handling the same event twice in a row has no effect. No ordering is
    /// enforced, so an owner can be moved out of `Destroyed`; use
    /// [`try_handle_lifecycle_event`](Self::try_handle_lifecycle_event) for
    /// checked transitions.
    pub fn handle_lifecycle_event(&self, event: LifecycleEvent) {
        if self.inner.last_event.get() == Some(event) {
            return;
        }
        self.inner.last_event.set(Some(event));
        let state = event.target_state();

        #[cfg(feature = "tracing")]
        tracing::trace!(?event, ?state, "lifecycle transition");

        self.inner.state.set(state);
        self.notify(state);
    }

    /// Like [`handle_lifecycle_event`](Self::handle_lifecycle_event), but
    /// rejects events that do not leave the current state.
    pub fn try_handle_lifecycle_event(&self, event: LifecycleEvent) -> Result<(), LifecycleError> {
        let from = self.inner.state.get();
        if from.is_destroyed() {
            return Err(LifecycleError::Destroyed { event });
        }
        if event.source_state() != from {
            return Err(LifecycleError::InvalidTransition { event, from });
        }
        self.handle_lifecycle_event(event);
        Ok(())
    }

    /// Move directly to `state`, notifying observers if it changed.
    pub fn set_current_state(&self, state: LifecycleState) {
        if self.inner.state.replace(state) == state {
            return;
        }
        self.inner.last_event.set(None);
        self.notify(state);
    }

    /// The number of observers.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    fn notify(&self, state: LifecycleState) {
        let round: Vec<(ObserverId, Rc<dyn LifecycleObserver>)> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect();

        for (id, observer) in round {
            if self.inner.is_observing(id) {
                observer.on_state_changed(state);
            }
        }
    }
}

impl Default for LifecycleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle for LifecycleRegistry {
    fn current_state(&self) -> LifecycleState {
        self.inner.state.get()
    }

    fn observe(&self, observer: Rc<dyn LifecycleObserver>) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.observers.borrow_mut().push((id, observer));

        let registry: Weak<RegistryInner> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.remove_observer(id);
            }
        })
    }
}

impl LifecycleOwner for LifecycleRegistry {
    fn lifecycle(&self) -> &dyn Lifecycle {
        self
    }
}

impl fmt::Debug for LifecycleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleRegistry")
            .field("state", &self.inner.state.get())
            .field("observers", &self.observer_count())
            .finish()
    }
}
