//! In-memory key listener registry.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::form::ports::{KeyListenerRegistry, ListenerHandle};

/// Registry that tracks attached listeners without a real event source.
#[derive(Debug, Default)]
pub struct InMemoryKeyListenerRegistry {
    issued: AtomicU64,
    active: Mutex<HashSet<ListenerHandle>>,
}

impl InMemoryKeyListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of currently attached listeners.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.lock().map(|active| active.len()).unwrap_or(0)
    }

    /// Returns whether `handle` is attached.
    #[must_use]
    pub fn is_attached(&self, handle: ListenerHandle) -> bool {
        self.active
            .lock()
            .map(|active| active.contains(&handle))
            .unwrap_or(false)
    }

    /// Returns how many listeners were ever attached.
    #[must_use]
    pub fn attached_total(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

impl KeyListenerRegistry for InMemoryKeyListenerRegistry {
    fn attach(&self) -> ListenerHandle {
        let issued = self.issued.fetch_add(1, Ordering::SeqCst);
        let handle = ListenerHandle::new(issued.saturating_add(1));
        if let Ok(mut active) = self.active.lock() {
            active.insert(handle);
        }
        handle
    }

    fn detach(&self, handle: ListenerHandle) {
        if let Ok(mut active) = self.active.lock() {
            active.remove(&handle);
        }
    }
}
