#![allow(dead_code)]

use backstep::{BackCallback, BackHandler, WeakBackDispatcher, testing::CountingHandler};

// ============================================================================
// Test Handlers
// ============================================================================

/// Counts, then disables itself and passes the press on.
pub struct PassthroughHandler {
    pub counter: CountingHandler,
    pub dispatcher: WeakBackDispatcher,
}

impl BackHandler for PassthroughHandler {
    fn handle_back_pressed(&self, callback: &BackCallback) {
        self.counter.handle_back_pressed(callback);
        callback.disable();
        self.dispatcher.dispatch();
    }
}

/// Counts, then removes its own callback.
pub struct SelfRemovingHandler {
    pub counter: CountingHandler,
}

impl BackHandler for SelfRemovingHandler {
    fn handle_back_pressed(&self, callback: &BackCallback) {
        self.counter.handle_back_pressed(callback);
        callback.remove();
    }
}

pub fn counting(enabled: bool) -> (CountingHandler, BackCallback) {
    let counter = CountingHandler::new();
    let callback = counter.callback().with_enabled(enabled);
    (counter, callback)
}
