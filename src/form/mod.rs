//! Task and calendar-event composer form.
//!
//! One panel creates or edits either a kanban task card or a calendar event.
//! Title heuristics propose mode, due-date and priority changes; files picked
//! before the task exists are staged and uploaded once it is saved. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
