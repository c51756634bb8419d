//! Adapter implementations for the subtask workflow ports.

pub mod memory;
pub mod postgres;
