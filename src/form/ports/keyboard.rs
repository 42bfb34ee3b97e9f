//! Port for the host's keyboard listener registry.

use std::fmt;

/// Handle identifying one attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    /// Wraps a registry-issued handle value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Attaches and detaches the form's document-level key listener.
pub trait KeyListenerRegistry: Send + Sync {
    /// Attaches a listener and returns its handle.
    fn attach(&self) -> ListenerHandle;

    /// Detaches a previously attached listener. Unknown handles are ignored.
    fn detach(&self, handle: ListenerHandle);
}
