//! # backstep-core
//!
//! Core traits for the backstep back-navigation dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that supplies callbacks or lifecycles without needing the dispatcher.
//!
//! # Capabilities
//!
//! - [`BackHandler`] / [`BackCallback`] - what runs on a back press, plus the
//!   enabled flag and self-removal that the handler can reach
//! - [`Cancellable`] / [`Subscription`] - idempotent teardown tokens
//! - [`Lifecycle`] / [`LifecycleOwner`] / [`LifecycleObserver`] - the
//!   observable state machine that gates lifecycle-bound callbacks
//!
//! # Error Types
//!
//! - [`LifecycleError`] - a rejected lifecycle transition

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod cancellable;
mod error;
mod lifecycle;

// Re-exports
pub use callback::{BackCallback, BackHandler};
pub use cancellable::{Cancellable, Subscription};
pub use error::LifecycleError;
pub use lifecycle::{Lifecycle, LifecycleEvent, LifecycleObserver, LifecycleOwner, LifecycleState};
