//! The back-press dispatcher.
//!
//! [`BackDispatcher`] owns an ordered registry of callbacks and routes each
//! back press to exactly one of them: the most recently added callback that is
//! enabled at the moment of the dispatch.
//!
//! # Re-entrancy
//!
//! [`dispatch`](BackDispatcher::dispatch) releases the registry before running
//! the chosen handler. A handler may add or remove callbacks, toggle enabled
//! flags, or dispatch again. A nested dispatch scans the registry as it is at
//! that moment; a handler that wants to pass the press on must disable itself
//! first, or it will be chosen again.

mod binding;
mod builder;
mod registration;
mod registry;

pub use builder::DispatcherBuilder;
pub use registration::Registration;

use backstep_core::{BackCallback, LifecycleOwner};
use binding::LifecycleBinding;
use registry::{CallbackRegistry, EntryId, Holder};
use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

pub(crate) struct DispatcherInner {
    name: &'static str,
    registry: RefCell<CallbackRegistry>,
    fallback: Option<Box<dyn Fn()>>,
}

impl DispatcherInner {
    fn acquire(&self, callback: &BackCallback, holder: Holder) -> (EntryId, bool) {
        let (id, acquired) = self.registry.borrow_mut().acquire(callback, holder);

        #[cfg(feature = "tracing")]
        tracing::debug!(dispatcher = %self.name, ?id, ?holder, acquired, "callback added");

        (id, acquired)
    }

    fn release(&self, id: EntryId, holder: Holder) -> bool {
        // Dropped after the registry borrow ends: a handler's destructor may
        // call back into the dispatcher.
        let removed = self.registry.borrow_mut().release(id, holder);

        #[cfg(feature = "tracing")]
        {
            if removed.is_some() {
                tracing::debug!(dispatcher = %self.name, ?id, ?holder, "callback removed");
            }
        }

        removed.is_some()
    }

    fn is_held(&self, id: EntryId, holder: Holder) -> bool {
        self.registry.borrow().is_held(id, holder)
    }

    fn binding_holder(&self) -> Holder {
        self.registry.borrow_mut().binding_holder()
    }
}

/// Routes back presses to the most recently added enabled callback.
///
/// `BackDispatcher` is a shared handle; clones refer to the same registry.
/// Handlers that need to reach the dispatcher should capture a
/// [`WeakBackDispatcher`] so the registry does not keep itself alive.
///
/// # Example
///
/// ```rust,ignore
/// let dispatcher = BackDispatcher::new();
///
/// let callback = BackCallback::new(|cb: &BackCallback| {
///     close_search();
///     cb.remove();
/// });
/// dispatcher.add_callback(&callback);
///
/// dispatcher.dispatch();
/// ```
#[derive(Clone)]
pub struct BackDispatcher {
    inner: Rc<DispatcherInner>,
}

impl BackDispatcher {
    /// Create a dispatcher with no fallback.
    pub fn new() -> Self {
        DispatcherBuilder::new().build()
    }

    /// Create a dispatcher that runs `fallback` when no callback is enabled.
    pub fn with_fallback(fallback: impl Fn() + 'static) -> Self {
        DispatcherBuilder::new().fallback(fallback).build()
    }

    /// Start configuring a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    fn from_builder(builder: DispatcherBuilder) -> Self {
        Self {
            inner: Rc::new(DispatcherInner {
                name: builder.name,
                registry: RefCell::new(CallbackRegistry::new()),
                fallback: builder.fallback,
            }),
        }
    }

    /// Add `callback` at the most-recent position.
    ///
    /// Adding a callback that is already registered moves it to the top.
    /// Plain additions of one callback share a single registration: removing
    /// through any of their handles undoes all of them, but leaves lifecycle
    /// bindings of the same callback in place.
    ///
    /// The registration is also recorded on the callback, so
    /// [`BackCallback::remove`] undoes it as well.
    pub fn add_callback(&self, callback: &BackCallback) -> Registration {
        let (id, acquired) = self.inner.acquire(callback, Holder::Plain);
        let registration = Registration::entry(Rc::downgrade(&self.inner), id);
        // Otherwise an equivalent registration is already recorded.
        if acquired {
            callback.add_cancellable(registration.clone());
        }
        registration
    }

    /// Add `callback` for as long as `owner` is started.
    ///
    /// The callback enters the registry (at the most-recent position) each
    /// time the owner reaches `Started`, leaves it when the owner drops below
    /// `Started`, and is detached for good once the owner is destroyed. If the
    /// owner is already destroyed nothing is registered.
    pub fn add_lifecycle_callback(
        &self,
        owner: &dyn LifecycleOwner,
        callback: &BackCallback,
    ) -> Registration {
        let Some(binding) = LifecycleBinding::bind(&self.inner, owner.lifecycle(), callback) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(dispatcher = %self.inner.name, "owner already destroyed; callback ignored");

            return Registration::detached();
        };

        let registration = Registration::lifecycle(Rc::downgrade(&binding));
        callback.add_cancellable(registration.clone());
        registration
    }

    /// Check whether any registered callback is enabled right now.
    pub fn has_enabled_callbacks(&self) -> bool {
        self.inner.registry.borrow().has_enabled()
    }

    /// Deliver a back press.
    ///
    /// Runs the handler of the most recently added enabled callback, and only
    /// that one. When none is enabled, runs the fallback if one was configured
    /// and otherwise does nothing.
    pub fn dispatch(&self) {
        let target = self.inner.registry.borrow().most_recent_enabled();

        match target {
            Some(callback) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(dispatcher = %self.inner.name, ?callback, "dispatching back press");

                callback.handle_back_pressed();
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    dispatcher = %self.inner.name,
                    fallback = self.inner.fallback.is_some(),
                    "no enabled callback"
                );

                if let Some(fallback) = &self.inner.fallback {
                    fallback();
                }
            }
        }
    }

    /// The number of callbacks currently in the registry.
    pub fn len(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The name that identifies this dispatcher in log output.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Create a handle that does not keep the dispatcher alive.
    pub fn downgrade(&self) -> WeakBackDispatcher {
        WeakBackDispatcher {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for BackDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BackDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackDispatcher")
            .field("name", &self.inner.name)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// A non-owning handle to a [`BackDispatcher`].
#[derive(Clone)]
pub struct WeakBackDispatcher {
    inner: Weak<DispatcherInner>,
}

impl WeakBackDispatcher {
    /// Get the dispatcher if it is still alive.
    pub fn upgrade(&self) -> Option<BackDispatcher> {
        self.inner.upgrade().map(|inner| BackDispatcher { inner })
    }

    /// Deliver a back press if the dispatcher is still alive.
    pub fn dispatch(&self) {
        if let Some(dispatcher) = self.upgrade() {
            dispatcher.dispatch();
        }
    }

    /// Like [`BackDispatcher::has_enabled_callbacks`]; `false` once the dispatcher is gone.
    pub fn has_enabled_callbacks(&self) -> bool {
        self.upgrade()
            .is_some_and(|dispatcher| dispatcher.has_enabled_callbacks())
    }
}

impl fmt::Debug for WeakBackDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakBackDispatcher")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backstep_std::testing::CountingHandler;
    use std::cell::Cell;

    #[test]
    fn test_registration_remove_is_idempotent() {
        let dispatcher = BackDispatcher::new();
        let counter = CountingHandler::new();
        let registration = dispatcher.add_callback(&counter.callback());
        assert!(registration.is_registered());

        registration.remove();
        registration.remove();
        assert!(!registration.is_registered());
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_registration_outlives_dispatcher() {
        let dispatcher = BackDispatcher::new();
        let callback = CountingHandler::new().callback();
        let registration = dispatcher.add_callback(&callback);

        drop(dispatcher);
        assert!(!registration.is_registered());
        assert!(!callback.is_registered());
        registration.remove();
        callback.remove();
    }

    #[test]
    fn test_dispatcher_does_not_own_itself_through_weak_handle() {
        let dispatcher = BackDispatcher::new();
        let weak = dispatcher.downgrade();
        let callback = BackCallback::new({
            let weak = weak.clone();
            move |cb: &BackCallback| {
                cb.disable();
                weak.dispatch();
            }
        });
        dispatcher.add_callback(&callback);

        drop(dispatcher);
        assert!(weak.upgrade().is_none());
        assert!(!weak.has_enabled_callbacks());
        weak.dispatch();
    }

    #[test]
    fn test_fallback_runs_only_without_enabled_callbacks() {
        let fallback_runs = Rc::new(Cell::new(0));
        let runs = fallback_runs.clone();
        let dispatcher = BackDispatcher::with_fallback(move || runs.set(runs.get() + 1));

        dispatcher.dispatch();
        assert_eq!(fallback_runs.get(), 1);

        let counter = CountingHandler::new();
        let callback = counter.callback();
        dispatcher.add_callback(&callback);
        dispatcher.dispatch();
        assert_eq!(counter.count(), 1);
        assert_eq!(fallback_runs.get(), 1);

        callback.disable();
        dispatcher.dispatch();
        assert_eq!(fallback_runs.get(), 2);
    }

    #[test]
    fn test_builder_name() {
        let dispatcher = BackDispatcher::builder().name("settings").build();
        assert_eq!(dispatcher.name(), "settings");
        assert_eq!(BackDispatcher::new().name(), "back");
    }

    #[test]
    fn test_re_adding_does_not_duplicate() {
        let dispatcher = BackDispatcher::new();
        let callback = CountingHandler::new().callback();
        let first = dispatcher.add_callback(&callback);
        let second = dispatcher.add_callback(&callback);
        assert_eq!(dispatcher.len(), 1);

        second.remove();
        assert!(!first.is_registered());
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_re_adding_records_one_registration() {
        let dispatcher = BackDispatcher::new();
        let callback = CountingHandler::new().callback();
        for _ in 0..1000 {
            dispatcher.add_callback(&callback);
        }
        assert_eq!(dispatcher.len(), 1);
        assert!(format!("{callback:?}").contains("registrations: 1,"));

        callback.remove();
        assert!(!callback.is_registered());
        assert!(dispatcher.is_empty());

        // A fresh entry after removal is recorded again.
        dispatcher.add_callback(&callback);
        assert!(callback.is_registered());
        assert!(format!("{callback:?}").contains("registrations: 1,"));
    }
}
