//! Lifecycle-bound registration.
//!
//! A binding keeps a callback in the dispatcher only while its owner is
//! started:
//!
//! ```text
//!              owner >= Started
//!   Detached ------------------> Attached
//!      ^                            |
//!      +----------------------------+
//!              owner <  Started
//!
//!   Detached | Attached --(Destroyed, remove(), dispatcher dropped)--> Cancelled
//! ```
//!
//! `Cancelled` is terminal. A binding is never created for an owner that is
//! already destroyed.
//!
//! Each binding holds the dispatcher entry under its own [`Holder`], so
//! detaching releases only the binding's claim: a plain registration of the
//! same callback keeps the entry alive, and nothing but the binding can take
//! it out from under an attached binding.
//!
//! The owner's lifecycle holds the only strong reference to a binding, through
//! its observer list. Everything else points at it weakly, so cancelling the
//! subscription is what frees it.

use super::{
    DispatcherInner,
    registry::{EntryId, Holder},
};
use backstep_core::{
    BackCallback, Cancellable, Lifecycle, LifecycleObserver, LifecycleState, Subscription,
};
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindingState {
    /// Subscribing; notifications are ignored until the subscription is stored.
    Unbound,
    /// Observing, callback not in the registry.
    Detached,
    /// Observing, callback in the registry under this id.
    Attached(EntryId),
    Cancelled,
}

pub(crate) struct LifecycleBinding {
    dispatcher: Weak<DispatcherInner>,
    holder: Holder,
    callback: BackCallback,
    state: Cell<BindingState>,
    subscription: RefCell<Option<Subscription>>,
}

impl LifecycleBinding {
    /// Bind `callback` to `lifecycle`. Returns `None` if the owner is destroyed.
    pub(crate) fn bind(
        dispatcher: &Rc<DispatcherInner>,
        lifecycle: &dyn Lifecycle,
        callback: &BackCallback,
    ) -> Option<Rc<Self>> {
        if lifecycle.current_state().is_destroyed() {
            return None;
        }

        let binding = Rc::new(Self {
            dispatcher: Rc::downgrade(dispatcher),
            holder: dispatcher.binding_holder(),
            callback: callback.clone(),
            state: Cell::new(BindingState::Unbound),
            subscription: RefCell::new(None),
        });

        let subscription = lifecycle.observe(binding.clone());
        *binding.subscription.borrow_mut() = Some(subscription);
        binding.state.set(BindingState::Detached);

        // An owner that is already started gets its callback right away.
        binding.apply(lifecycle.current_state());
        Some(binding)
    }

    fn apply(&self, state: LifecycleState) {
        let current = self.state.get();
        if matches!(current, BindingState::Unbound | BindingState::Cancelled) {
            return;
        }
        if state.is_destroyed() {
            self.cancel();
            return;
        }
        let Some(dispatcher) = self.dispatcher.upgrade() else {
            self.cancel();
            return;
        };

        match (current, state.is_at_least(LifecycleState::Started)) {
            (BindingState::Detached, true) => {
                let (id, _) = dispatcher.acquire(&self.callback, self.holder);
                self.state.set(BindingState::Attached(id));

                #[cfg(feature = "tracing")]
                tracing::debug!(dispatcher = %dispatcher.name, ?state, "lifecycle callback attached");
            }
            (BindingState::Attached(id), false) => {
                self.state.set(BindingState::Detached);
                dispatcher.release(id, self.holder);

                #[cfg(feature = "tracing")]
                tracing::debug!(dispatcher = %dispatcher.name, ?state, "lifecycle callback detached");
            }
            _ => {}
        }
    }

    /// Remove the callback if attached and stop observing. Idempotent.
    pub(crate) fn cancel(&self) {
        let previous = self.state.replace(BindingState::Cancelled);
        if previous == BindingState::Cancelled {
            return;
        }

        if let BindingState::Attached(id) = previous {
            if let Some(dispatcher) = self.dispatcher.upgrade() {
                dispatcher.release(id, self.holder);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(?previous, "lifecycle binding cancelled");

        let subscription = self.subscription.borrow_mut().take();
        if let Some(subscription) = subscription {
            subscription.cancel();
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.state.get() == BindingState::Cancelled
    }
}

impl LifecycleObserver for LifecycleBinding {
    fn on_state_changed(&self, state: LifecycleState) {
        self.apply(state);
    }
}

impl Drop for LifecycleBinding {
    // The owner's lifecycle went away without reaching `Destroyed`.
    fn drop(&mut self) {
        if let BindingState::Attached(id) = self.state.get() {
            if let Some(dispatcher) = self.dispatcher.upgrade() {
                dispatcher.release(id, self.holder);
            }
        }
    }
}
