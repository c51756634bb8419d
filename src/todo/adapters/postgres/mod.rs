//! `PostgreSQL` adapters for to-do persistence.

mod models;
mod schema;
mod store;

pub use store::{PostgresTodoStore, TodoPgPool};
