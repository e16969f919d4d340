//! Error type for `hospital-store-sqlite`.

use std::time::Duration;

use hospital_core::store::{StoreError, UniqueField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("request exceeded the {0:?} timeout")]
  Timeout(Duration),

  /// A write collided with a UNIQUE index.
  #[error("unique constraint violated on {0}")]
  UniqueViolation(UniqueField),
}

impl Error {
  /// Lift a driver error, recognising UNIQUE violations on the columns the
  /// service layer cares about.
  pub(crate) fn classify(err: tokio_rusqlite::Error) -> Self {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, Some(msg))) = &err
      && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
      && let Some(field) = unique_field(msg)
    {
      return Error::UniqueViolation(field);
    }
    Error::Database(err)
  }
}

/// SQLite reports e.g. `UNIQUE constraint failed: patients.email`.
fn unique_field(msg: &str) -> Option<UniqueField> {
  let column = msg.rsplit(": ").next()?;
  match column {
    "patients.email" => Some(UniqueField::Email),
    "patients.policy_number" => Some(UniqueField::PolicyNumber),
    "doctors.portfolio_id" => Some(UniqueField::PortfolioId),
    _ => None,
  }
}

impl StoreError for Error {
  fn unique_violation(&self) -> Option<UniqueField> {
    match self {
      Error::UniqueViolation(field) => Some(*field),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
