//! Error taxonomy for the service layer.

use hospital_core::store::{Entity, StoreError, UniqueField};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The named entity does not exist.
  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("a patient with this email already exists")]
  RepeatedEmail,

  #[error("a patient with this policy number already exists")]
  RepeatedPolicyNumber,

  #[error("this portfolio already belongs to a doctor")]
  RepeatedPortfolioId,

  #[error("doctor is not available for booking")]
  DoctorNotAvailable,

  #[error(transparent)]
  Validation(#[from] hospital_core::Error),

  // ── Unexpected ────────────────────────────────────────────────────────────
  #[error("password hashing failed: {0}")]
  PasswordHash(String),

  #[error("token error: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),

  #[error("token lifetime runs past the representable date range")]
  TokenLifetime,

  #[error("storage error: {0}")]
  Store(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// `NotFound` for entity type `E`.
  pub fn not_found<E: Entity>() -> Self { Error::NotFound(E::NAME) }

  /// Classify a backend error. UNIQUE-index rejections become the matching
  /// `Repeated*` kind; everything else is passed through as [`Error::Store`].
  pub fn from_store<E: StoreError>(err: E) -> Self {
    match err.unique_violation() {
      Some(UniqueField::Email) => Error::RepeatedEmail,
      Some(UniqueField::PolicyNumber) => Error::RepeatedPolicyNumber,
      Some(UniqueField::PortfolioId) => Error::RepeatedPortfolioId,
      None => Error::Store(Box::new(err)),
    }
  }

  /// True for failures that are the server's fault rather than the caller's.
  pub fn is_unexpected(&self) -> bool {
    matches!(
      self,
      Error::PasswordHash(_) | Error::Token(_) | Error::TokenLifetime | Error::Store(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
