//! In-memory adapter implementations.
//!
//! These adapters keep all state in process and are used by tests and the
//! demo binary.

mod keyboard;
mod remote;

pub use keyboard::InMemoryKeyListenerRegistry;
pub use remote::{InMemoryRemote, RemoteOperation, StoredAttachment};
