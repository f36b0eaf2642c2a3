//! Removal handles returned on registration.

use super::{
    DispatcherInner,
    binding::LifecycleBinding,
    registry::{EntryId, Holder},
};
use backstep_core::Cancellable;
use std::{fmt, rc::Weak};

#[derive(Clone)]
enum Target {
    Entry {
        dispatcher: Weak<DispatcherInner>,
        id: EntryId,
    },
    Lifecycle(Weak<LifecycleBinding>),
    Detached,
}

/// A handle that removes one registration from a [`BackDispatcher`].
///
/// The handle only points back at the dispatcher; it never keeps the
/// dispatcher or the callback alive. Removing is idempotent, and removing
/// after the dispatcher or the lifecycle owner went away does nothing.
///
/// [`BackDispatcher`]: crate::BackDispatcher
#[derive(Clone)]
pub struct Registration {
    target: Target,
}

impl Registration {
    pub(crate) fn entry(dispatcher: Weak<DispatcherInner>, id: EntryId) -> Self {
        Self {
            target: Target::Entry { dispatcher, id },
        }
    }

    pub(crate) fn lifecycle(binding: Weak<LifecycleBinding>) -> Self {
        Self {
            target: Target::Lifecycle(binding),
        }
    }

    /// A registration that never took effect.
    pub(crate) fn detached() -> Self {
        Self {
            target: Target::Detached,
        }
    }

    /// Remove the registration.
    ///
    /// Only this registration's claim is dropped: the callback stays in the
    /// dispatcher if it is also registered another way. For a lifecycle-bound
    /// registration this also stops observing the owner.
    pub fn remove(&self) {
        match &self.target {
            Target::Entry { dispatcher, id } => {
                if let Some(dispatcher) = dispatcher.upgrade() {
                    dispatcher.release(*id, Holder::Plain);
                }
            }
            Target::Lifecycle(binding) => {
                if let Some(binding) = binding.upgrade() {
                    binding.cancel();
                }
            }
            Target::Detached => {}
        }
    }

    /// Check whether the registration is still in effect.
    ///
    /// A plain registration is in effect until it is removed. A
    /// lifecycle-bound registration is in effect until it is removed or its
    /// owner is destroyed; while the owner is stopped its callback may be
    /// absent from the dispatcher, and while the owner is started the callback
    /// is always present, whatever happens to other registrations of it.
    pub fn is_registered(&self) -> bool {
        match &self.target {
            Target::Entry { dispatcher, id } => dispatcher
                .upgrade()
                .is_some_and(|dispatcher| dispatcher.is_held(*id, Holder::Plain)),
            Target::Lifecycle(binding) => binding
                .upgrade()
                .is_some_and(|binding| !binding.is_cancelled()),
            Target::Detached => false,
        }
    }
}

impl Cancellable for Registration {
    fn cancel(&self) {
        self.remove();
    }

    fn is_cancelled(&self) -> bool {
        !self.is_registered()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.target {
            Target::Entry { .. } => "entry",
            Target::Lifecycle(_) => "lifecycle",
            Target::Detached => "detached",
        };
        f.debug_struct("Registration")
            .field("kind", &kind)
            .field("registered", &self.is_registered())
            .finish()
    }
}
