//! Error types for `hospital-core`.

use thiserror::Error;

use crate::Id;

/// An input rejected before it reaches storage.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
  #[error("field `{0}` must not be empty")]
  EmptyField(&'static str),

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  #[error("rating {0} is outside the range 0..=5")]
  RatingOutOfRange(f32),

  #[error("id must be a positive integer, got {0}")]
  InvalidId(Id),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
