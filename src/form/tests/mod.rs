//! Unit tests for the composer form.
//!
//! Tests are organised by component: domain values first, then the services
//! that orchestrate them.

mod support;
