//! Dispatcher configuration.

use super::BackDispatcher;
use std::fmt;

/// Builder for constructing a [`BackDispatcher`].
///
/// # Example
/// ```ignore
/// let dispatcher = BackDispatcher::builder()
///     .name("main_activity")
///     .fallback(|| finish_activity())
///     .build();
/// ```
pub struct DispatcherBuilder {
    pub(crate) name: &'static str,
    pub(crate) fallback: Option<Box<dyn Fn()>>,
}

impl DispatcherBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            name: "back",
            fallback: None,
        }
    }

    /// Set the name that identifies the dispatcher in log output.
    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Set the action run when a dispatch finds no enabled callback.
    pub fn fallback(mut self, fallback: impl Fn() + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Build the dispatcher.
    pub fn build(self) -> BackDispatcher {
        BackDispatcher::from_builder(self)
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DispatcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("name", &self.name)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
