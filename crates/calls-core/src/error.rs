//! Error types for `calls-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A create request is missing a required field or carries a malformed
  /// phone number.
  #[error("{0}")]
  Validation(String),

  #[error("record not found: {0}")]
  NotFound(i64),

  #[error("unknown call status: {0:?}")]
  UnknownStatus(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
