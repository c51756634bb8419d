//! Step definitions for subtask workflow scenarios.

pub mod world;

mod then;
mod when;
