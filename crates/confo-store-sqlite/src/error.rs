//! Error type for `confo-store-sqlite`.
//!
//! Everything here is a backend fault (I/O, SQL, column decoding). Domain
//! outcomes — conflicts, not-found, validation — are expressed directly as
//! [`confo_core::Error`] values by the store; this type folds into that
//! taxonomy through its `Backend` variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("timestamp parse error: {0}")]
  DateParse(String),

  #[error("unknown {column} value: {value:?}")]
  UnknownEnum {
    column: &'static str,
    value:  String,
  },
}

impl From<Error> for confo_core::Error {
  fn from(e: Error) -> Self {
    confo_core::Error::backend(e)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
