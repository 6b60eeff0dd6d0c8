//! Error type for `companion-store-sqlite`.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The timestamp cannot be stored as nanoseconds since the Unix epoch
  /// (before 1677 or after 2262).
  #[error("timestamp out of storable range: {0}")]
  TimestampRange(DateTime<Utc>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
