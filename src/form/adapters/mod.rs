//! Adapters for the composer form ports.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryRemote`]: Thread-safe in-memory remote data client with
//!   a call log and failure injection
//! - [`memory::InMemoryKeyListenerRegistry`]: Key listener registry that only
//!   counts attachments
//! - [`diagnostics::TracingDiagnostics`]: Diagnostic channel backed by
//!   `tracing`
//! - [`diagnostics::RecordingDiagnostics`]: Diagnostic channel that keeps
//!   entries for inspection

pub mod diagnostics;
pub mod memory;
