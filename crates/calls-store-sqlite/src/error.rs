//! Error type for `calls-store-sqlite`.

use calls_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] calls_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("record not found")]
  NotFound(i64),

  #[error("invalid connection string: {0:?}")]
  InvalidConnectionString(String),

  #[error("timed out closing the database connection")]
  CloseTimeout,
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool {
    matches!(
      self,
      Error::NotFound(_) | Error::Core(calls_core::Error::NotFound(_))
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
