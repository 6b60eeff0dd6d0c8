//! SQLite backend for the vehicle companion's favorite and vehicle stores.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every write publishes a fresh snapshot
//! of the touched table to its live-query subscribers.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
