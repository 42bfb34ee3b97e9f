//! Step definitions for composer BDD scenarios.

pub mod world;

mod given;
mod then;
mod when;
