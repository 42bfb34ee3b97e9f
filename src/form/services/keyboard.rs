//! Scoped ownership of the form's key listener.

use crate::form::ports::{KeyListenerRegistry, ListenerHandle};
use std::sync::Arc;
use tracing::trace;

/// Keeps one key listener attached for as long as the scope lives.
///
/// The listener is detached when the scope is dropped, whichever path closed
/// the form.
pub struct KeyboardScope {
    registry: Arc<dyn KeyListenerRegistry>,
    handle: ListenerHandle,
}

impl KeyboardScope {
    /// Attaches a listener through `registry`.
    #[must_use]
    pub fn attach(registry: Arc<dyn KeyListenerRegistry>) -> Self {
        let handle = registry.attach();
        trace!(%handle, "key listener attached");
        Self { registry, handle }
    }

    /// Returns the attached listener.
    #[must_use]
    pub const fn handle(&self) -> ListenerHandle {
        self.handle
    }
}

impl Drop for KeyboardScope {
    fn drop(&mut self) {
        self.registry.detach(self.handle);
        trace!(handle = %self.handle, "key listener detached");
    }
}
