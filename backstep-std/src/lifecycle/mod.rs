//! Lifecycle implementations.
//!
//! [`LifecycleRegistry`] is the standard observable lifecycle. Owners drive it,
//! and lifecycle-bound callbacks observe it.

pub mod registry;

pub use registry::LifecycleRegistry;
