//! # backstep - Back-Navigation Dispatcher
//!
//! `backstep` routes a single "back requested" signal to exactly one
//! interested consumer. Consumers are [`BackCallback`]s; the one that receives
//! the signal is the most recently added callback that is enabled at the time
//! of the dispatch.
//!
//! Callbacks can also be bound to a [`LifecycleOwner`]. A bound callback only
//! takes part in dispatch while its owner is started and is detached for good
//! once the owner is destroyed.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use backstep::prelude::*;
//!
//! let dispatcher = BackDispatcher::new();
//!
//! // Plain registration: always present until removed.
//! let drawer = BackCallback::new(|cb: &BackCallback| {
//!     close_drawer();
//!     cb.disable();
//! });
//! dispatcher.add_callback(&drawer);
//!
//! // Lifecycle-bound registration: present only while `screen` is started.
//! dispatcher.add_lifecycle_callback(&screen, &BackCallback::new(go_up));
//!
//! // Called by the platform integration on each back press.
//! dispatcher.dispatch();
//! ```
//!
//! ## Threading
//!
//! Everything here is single-threaded (`Rc`, `Cell`, `RefCell`): the
//! dispatcher, its callbacks and the lifecycles they observe live on one
//! event thread.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dispatcher;

pub use backstep_core::{
    // Callback capability
    BackCallback,
    BackHandler,
    // Cancellation
    Cancellable,
    // Lifecycle contract
    Lifecycle,
    LifecycleError,
    LifecycleEvent,
    LifecycleObserver,
    LifecycleOwner,
    LifecycleState,
    Subscription,
};

pub use dispatcher::{BackDispatcher, DispatcherBuilder, Registration, WeakBackDispatcher};

pub use backstep_std::LifecycleRegistry;

/// Standard handler implementations.
pub mod handlers {
    pub use backstep_std::handlers::{ConditionalHandler, LoggingHandler};
}

/// Testing utilities.
pub mod testing {
    pub use backstep_std::testing::{
        CountingHandler, OrderRecorder, RecordingHandler, TestLifecycleOwner,
    };
}

/// Prelude module - common imports for backstep.
///
/// # Usage
///
/// ```rust,ignore
/// use backstep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BackCallback, BackDispatcher, BackHandler, Lifecycle, LifecycleEvent, LifecycleOwner,
        LifecycleRegistry, LifecycleState, Registration,
    };
}
