//! # backstep-std
//!
//! Standard implementations for the backstep back-navigation dispatcher.
//!
//! This crate provides:
//! - **Lifecycles**: [`LifecycleRegistry`], an observable lifecycle with many observers
//! - **Standard handlers**: Logging, Conditional
//! - **Testing utilities**: counting and order-recording handlers, a test lifecycle owner

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use backstep_core;

// Modules
pub mod handlers;
pub mod lifecycle;
pub mod testing;

pub use lifecycle::LifecycleRegistry;
