//! Cancellation tokens.

use std::{cell::RefCell, fmt};

/// Something that can be cancelled exactly once.
///
/// Cancelling twice, or cancelling after the target went away, is a no-op.
pub trait Cancellable {
    /// Cancel. Idempotent.
    fn cancel(&self);

    /// Check whether this token no longer has any effect.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// A one-shot teardown returned by [`Lifecycle::observe`].
///
/// Dropping a subscription does not cancel it.
///
/// [`Lifecycle::observe`]: crate::Lifecycle::observe
pub struct Subscription {
    teardown: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
    /// Create a subscription that runs `teardown` when cancelled.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: RefCell::new(Some(Box::new(teardown))),
        }
    }

    /// Create a subscription that is already cancelled.
    pub fn empty() -> Self {
        Self {
            teardown: RefCell::new(None),
        }
    }
}

impl Cancellable for Subscription {
    fn cancel(&self) {
        // Release the borrow before running the teardown; it may re-enter.
        let teardown = self.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    fn is_cancelled(&self) -> bool {
        self.teardown.borrow().is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn test_subscription_runs_once() {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let sub = Subscription::new(move || counter.set(counter.get() + 1));

        assert!(!sub.is_cancelled());
        sub.cancel();
        sub.cancel();
        assert_eq!(runs.get(), 1);
        assert!(sub.is_cancelled());
    }

    #[test]
    fn test_drop_does_not_cancel() {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        drop(Subscription::new(move || counter.set(1)));
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn test_empty_is_cancelled() {
        assert!(Subscription::empty().is_cancelled());
    }
}
