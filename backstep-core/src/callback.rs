//! # Back Callbacks
//!
//! A [`BackCallback`] is a consumer of the back-navigation signal. It pairs a
//! caller-supplied [`BackHandler`] with an enabled flag and the set of places
//! it is registered.
//!
//! Callbacks are shared handles: cloning one yields another handle to the same
//! callback. The handler receives that handle on every invocation, so it can
//! flip its own enabled flag or remove itself without capturing anything.
//!
//! ```rust,ignore
//! let callback = BackCallback::new(|cb: &BackCallback| {
//!     close_drawer();
//!     cb.disable();
//! });
//! ```

use crate::cancellable::Cancellable;
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

/// The behavior run when a back press reaches a callback.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle back presses",
    label = "missing `BackHandler` implementation",
    note = "Implement `BackHandler` or pass a closure `Fn(&BackCallback)`."
)]
pub trait BackHandler: 'static {
    /// Handle a back press. `callback` is the callback this handler belongs to.
    fn handle_back_pressed(&self, callback: &BackCallback);
}

impl<F> BackHandler for F
where
    F: Fn(&BackCallback) + 'static,
{
    fn handle_back_pressed(&self, callback: &BackCallback) {
        (self)(callback)
    }
}

struct CallbackInner {
    enabled: Cell<bool>,
    handler: Box<dyn BackHandler>,
    // Non-owning: each entry only points back at where the callback lives.
    registrations: RefCell<Vec<Box<dyn Cancellable>>>,
}

/// A shared handle to a back-press consumer.
#[derive(Clone)]
pub struct BackCallback {
    inner: Rc<CallbackInner>,
}

impl BackCallback {
    /// Create an enabled callback around `handler`.
    pub fn new<H: BackHandler>(handler: H) -> Self {
        Self {
            inner: Rc::new(CallbackInner {
                enabled: Cell::new(true),
                handler: Box::new(handler),
                registrations: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Set the initial enabled state.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    /// Check if the callback is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    /// Set the enabled state. Takes effect on the next dispatch.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.set(enabled);
    }

    /// Enable the callback.
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Disable the callback.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Toggle the enabled state, returning the new state.
    pub fn toggle(&self) -> bool {
        let enabled = !self.is_enabled();
        self.set_enabled(enabled);
        enabled
    }

    /// Run the handler.
    pub fn handle_back_pressed(&self) {
        self.inner.handler.handle_back_pressed(self);
    }

    /// Record a registration so that [`remove`](Self::remove) can cancel it.
    ///
    /// Registrations that were already cancelled are pruned first.
    pub fn add_cancellable<C: Cancellable + 'static>(&self, cancellable: C) {
        let mut registrations = self.inner.registrations.borrow_mut();
        registrations.retain(|c| !c.is_cancelled());
        registrations.push(Box::new(cancellable));
    }

    /// Remove this callback from everywhere it is registered.
    ///
    /// Safe to call from inside the handler, and safe to call repeatedly.
    pub fn remove(&self) {
        let registrations = std::mem::take(&mut *self.inner.registrations.borrow_mut());
        for registration in registrations {
            registration.cancel();
        }
    }

    /// Check whether any registration of this callback is still live.
    pub fn is_registered(&self) -> bool {
        self.inner
            .registrations
            .borrow()
            .iter()
            .any(|c| !c.is_cancelled())
    }

    /// Check whether two handles point to the same callback.
    pub fn ptr_eq(&self, other: &BackCallback) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for BackCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackCallback")
            .field("enabled", &self.is_enabled())
            .field("registrations", &self.inner.registrations.borrow().len())
            .finish_non_exhaustive()
    }
}
