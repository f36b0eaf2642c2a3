//! Logging Handler - Observability for back presses.

use backstep_core::{BackCallback, BackHandler};

/// A handler that logs each back press before delegating to an inner handler.
///
/// It uses the `tracing` crate when the `tracing` feature is enabled and is a
/// plain pass-through otherwise.
///
/// # Example
///
/// ```rust,ignore
/// use backstep_std::handlers::LoggingHandler;
///
/// let callback = BackCallback::new(LoggingHandler::named("drawer", close_drawer));
/// ```
pub struct LoggingHandler<H> {
    name: &'static str,
    inner: H,
}

impl<H> LoggingHandler<H> {
    /// Wrap `inner` with the default name.
    pub fn new(inner: H) -> Self {
        Self::named("back", inner)
    }

    /// Wrap `inner` with a custom name.
    ///
    /// The name is used in log messages to identify the callback.
    pub fn named(name: &'static str, inner: H) -> Self {
        Self { name, inner }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<H: BackHandler> BackHandler for LoggingHandler<H> {
    fn handle_back_pressed(&self, callback: &BackCallback) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.name, enabled = callback.is_enabled(), "Handling back press");
        }

        self.inner.handle_back_pressed(callback);
    }
}
