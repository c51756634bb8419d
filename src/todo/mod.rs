//! Subtask workflow for the to-do list application.
//!
//! Subtasks can be added, edited, starred, completed, soft deleted, and
//! promoted into tasks of an existing or newly created group. Destructive
//! operations leave a short-lived record in the undo cache. The module
//! follows hexagonal architecture:
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
