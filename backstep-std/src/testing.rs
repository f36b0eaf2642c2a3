//! Testing utilities for backstep.
//!
//! This module provides utilities to make testing callbacks and lifecycle
//! bindings easier.
//!
//! # Features
//!
//! - [`CountingHandler`]: A handler that counts invocations
//! - [`OrderRecorder`]: Records which labelled handlers ran, in order
//! - [`TestLifecycleOwner`]: A lifecycle owner driven directly by the test

use crate::lifecycle::LifecycleRegistry;
use backstep_core::{BackCallback, BackHandler, Lifecycle, LifecycleEvent, LifecycleOwner};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// let callback = BackCallback::new(counter.clone());
///
/// dispatcher.add_callback(&callback);
/// dispatcher.dispatch();
///
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Rc<Cell<usize>>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.set(0);
    }

    /// Create an enabled callback around a clone of this handler.
    pub fn callback(&self) -> BackCallback {
        BackCallback::new(self.clone())
    }
}

impl BackHandler for CountingHandler {
    fn handle_back_pressed(&self, _callback: &BackCallback) {
        self.count.set(self.count.get() + 1);
    }
}

// ============================================================================
// Order Recorder
// ============================================================================

/// Records the labels of handlers in the order they ran.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = OrderRecorder::new();
/// dispatcher.add_callback(&BackCallback::new(recorder.handler("a")));
/// dispatcher.add_callback(&BackCallback::new(recorder.handler("b")));
///
/// dispatcher.dispatch();
/// assert_eq!(recorder.order(), vec!["b"]);
/// ```
#[derive(Clone, Default)]
pub struct OrderRecorder {
    order: Rc<RefCell<Vec<&'static str>>>,
}

impl OrderRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler that records `label` each time it runs.
    pub fn handler(&self, label: &'static str) -> RecordingHandler {
        RecordingHandler {
            label,
            order: self.order.clone(),
        }
    }

    /// Get a copy of the recorded labels.
    pub fn order(&self) -> Vec<&'static str> {
        self.order.borrow().clone()
    }

    /// Count how often `label` was recorded.
    pub fn count(&self, label: &str) -> usize {
        self.order.borrow().iter().filter(|l| **l == label).count()
    }

    /// Clear all recorded labels.
    pub fn clear(&self) {
        self.order.borrow_mut().clear();
    }
}

/// A handler created by [`OrderRecorder::handler`].
pub struct RecordingHandler {
    label: &'static str,
    order: Rc<RefCell<Vec<&'static str>>>,
}

impl BackHandler for RecordingHandler {
    fn handle_back_pressed(&self, _callback: &BackCallback) {
        self.order.borrow_mut().push(self.label);
    }
}

// ============================================================================
// Test Lifecycle Owner
// ============================================================================

/// A lifecycle owner whose transitions are driven by the test.
#[derive(Clone, Debug, Default)]
pub struct TestLifecycleOwner {
    registry: LifecycleRegistry,
}

impl TestLifecycleOwner {
    /// Create an owner in the `Initialized` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an owner that already handled `Create`.
    pub fn created() -> Self {
        let owner = Self::new();
        owner.handle(LifecycleEvent::Create);
        owner
    }

    /// Create an owner that already handled `Create` and `Start`.
    pub fn started() -> Self {
        let owner = Self::created();
        owner.handle(LifecycleEvent::Start);
        owner
    }

    /// Drive a lifecycle event, without ordering checks.
    pub fn handle(&self, event: LifecycleEvent) {
        self.registry.handle_lifecycle_event(event);
    }

    /// Access the underlying registry.
    pub fn registry(&self) -> &LifecycleRegistry {
        &self.registry
    }
}

impl LifecycleOwner for TestLifecycleOwner {
    fn lifecycle(&self) -> &dyn Lifecycle {
        &self.registry
    }
}
