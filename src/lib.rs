//! Subtask workflow core for a to-do list application.
//!
//! This crate holds the business rules behind subtask management: creation,
//! editing, completion (with cascading reopen of the parent task), soft
//! deletion, and promotion of a subtask into a task of another group. The
//! request-handling layer sits outside this crate and talks to
//! [`todo::services::SubTaskService`].
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and the undo cache
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`todo`]: Subtask workflow domain, ports, adapters, and services
//! - [`config`]: Workflow configuration and environment overrides
//! - [`telemetry`]: Tracing subscriber bootstrap

pub mod config;
pub mod telemetry;
pub mod todo;
