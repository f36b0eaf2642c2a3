//! Conditional Handler - Run a handler only when a condition holds.

use backstep_core::{BackCallback, BackHandler};

/// A handler that runs its inner handler only when `condition` returns `true`.
///
/// Unlike disabling the callback, a false condition still consumes the back
/// press: the dispatcher has already chosen this callback.
///
/// # Example
///
/// ```rust,ignore
/// use backstep_std::handlers::ConditionalHandler;
///
/// let guarded = ConditionalHandler::new(move |_: &BackCallback| !form.is_saving(), discard_form);
/// ```
pub struct ConditionalHandler<C, H> {
    condition: C,
    inner: H,
}

impl<C, H> ConditionalHandler<C, H> {
    /// Create a new `ConditionalHandler`.
    pub fn new(condition: C, inner: H) -> Self {
        Self { condition, inner }
    }
}

impl<C, H> BackHandler for ConditionalHandler<C, H>
where
    C: Fn(&BackCallback) -> bool + 'static,
    H: BackHandler,
{
    fn handle_back_pressed(&self, callback: &BackCallback) {
        if (self.condition)(callback) {
            self.inner.handle_back_pressed(callback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingHandler;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn test_conditional_handler_gates_inner() {
        let open = Rc::new(Cell::new(false));
        let gate = open.clone();
        let counter = CountingHandler::new();
        let callback = BackCallback::new(ConditionalHandler::new(
            move |_: &BackCallback| gate.get(),
            counter.clone(),
        ));

        callback.handle_back_pressed();
        assert_eq!(counter.count(), 0);

        open.set(true);
        callback.handle_back_pressed();
        assert_eq!(counter.count(), 1);
    }
}
