//! Ordered callback registry.
//!
//! Entries are kept in insertion order. Dispatch scans them in reverse, so
//! the last entry is the first one considered.

use backstep_core::BackCallback;

/// Identity of an entry in a dispatcher's registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EntryId(u64);

/// Something that keeps an entry in the registry.
///
/// An entry is removed when its last holder releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Holder {
    /// Shared by every plain `add_callback` of the callback.
    Plain,
    /// One per lifecycle binding.
    Binding(u64),
}

struct Entry {
    id: EntryId,
    callback: BackCallback,
    holders: Vec<Holder>,
}

pub(crate) struct CallbackRegistry {
    entries: Vec<Entry>,
    next_id: u64,
    next_binding: u64,
}

impl CallbackRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            next_binding: 0,
        }
    }

    /// A fresh holder for a lifecycle binding.
    pub(crate) fn binding_holder(&mut self) -> Holder {
        let holder = Holder::Binding(self.next_binding);
        self.next_binding += 1;
        holder
    }

    /// Place `callback` at the most-recent position on behalf of `holder`.
    ///
    /// A callback that is already present moves to the top and keeps its id.
    /// The flag is `false` when `holder` already held the entry.
    pub(crate) fn acquire(&mut self, callback: &BackCallback, holder: Holder) -> (EntryId, bool) {
        if let Some(pos) = self.entries.iter().position(|e| e.callback.ptr_eq(callback)) {
            let mut entry = self.entries.remove(pos);
            let acquired = !entry.holders.contains(&holder);
            if acquired {
                entry.holders.push(holder);
            }
            let id = entry.id;
            self.entries.push(entry);
            return (id, acquired);
        }

        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            callback: callback.clone(),
            holders: vec![holder],
        });
        (id, true)
    }

    /// Drop `holder`'s claim on the entry with `id`.
    ///
    /// Hands back the callback when that was the last holder and the entry
    /// left the registry.
    pub(crate) fn release(&mut self, id: EntryId, holder: Holder) -> Option<BackCallback> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let entry = &mut self.entries[pos];
        entry.holders.retain(|h| *h != holder);
        if !entry.holders.is_empty() {
            return None;
        }
        Some(self.entries.remove(pos).callback)
    }

    pub(crate) fn is_held(&self, id: EntryId, holder: Holder) -> bool {
        self.entries
            .iter()
            .any(|e| e.id == id && e.holders.contains(&holder))
    }

    /// The newest entry whose callback is enabled right now.
    pub(crate) fn most_recent_enabled(&self) -> Option<BackCallback> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.callback.is_enabled())
            .map(|e| e.callback.clone())
    }

    pub(crate) fn has_enabled(&self) -> bool {
        self.entries.iter().any(|e| e.callback.is_enabled())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
