//! Composer: task and calendar-event creation form logic.
//!
//! This crate provides the control logic behind a single form that creates
//! or edits either a task card or a calendar event: mode selection, title
//! heuristics, date selection, attachment staging and the sequencing of
//! remote create, update, upload and delete calls.
//!
//! # Architecture
//!
//! Composer follows hexagonal architecture principles:
//!
//! - **Domain**: Pure form state with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the remote API, diagnostics and
//!   keyboard listeners
//! - **Adapters**: Concrete implementations of ports (in-memory, tracing)
//!
//! # Modules
//!
//! - [`config`]: Form tunables and heuristic keyword lists
//! - [`form`]: The composer form bounded context

pub mod config;
pub mod form;
