//! Error types for `companion-core`.

use thiserror::Error;

/// A failure reported by a [`DiscoveryClient`](crate::client::DiscoveryClient).
#[derive(Debug, Error)]
pub enum DiscoveryError {
  /// The endpoint answered with a non-2xx status.
  #[error("API Error: {status} {reason}")]
  Api { status: u16, reason: String },

  /// The request never produced a response (timeout, DNS, connection reset).
  /// The underlying error is kept as-is so callers can downcast it.
  #[error(transparent)]
  Transport(Box<dyn std::error::Error + Send + Sync>),

  /// A 2xx response whose body was not a valid discovery payload.
  #[error("malformed discovery response: {0}")]
  Decode(#[from] serde_json::Error),
}

impl DiscoveryError {
  /// Wrap any transport-level error without altering it.
  pub fn transport<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Transport(Box::new(err))
  }

  /// The HTTP status carried by an [`DiscoveryError::Api`] failure.
  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Api { status, .. } => Some(*status),
      _ => None,
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Discovery(#[from] DiscoveryError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The year field of a vehicle form is not an integer.
  #[error("invalid model year: {0:?}")]
  InvalidYear(String),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
