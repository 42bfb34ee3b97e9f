//! Port contracts for the composer form.
//!
//! Ports define infrastructure-agnostic interfaces used by the form
//! services: the remote data client, the diagnostic channel and the keyboard
//! listener registry.

pub mod diagnostics;
pub mod keyboard;
pub mod remote;

pub use diagnostics::{Diagnostic, Diagnostics};
pub use keyboard::{KeyListenerRegistry, ListenerHandle};
pub use remote::{
    AttachmentApi, Board, BoardColumn, CalendarApi, DirectoryApi, EventPayload, RemoteApis,
    RemoteError, RemoteResult, TaskApi, TaskPayload, UploadRequest, UploadedAttachment,
    WorkspaceMember,
};
