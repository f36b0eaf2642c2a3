//! Standard handler wrappers.

pub mod conditional;
pub mod logging;

pub use conditional::ConditionalHandler;
pub use logging::LoggingHandler;
