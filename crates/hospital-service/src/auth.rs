//! Authentication: login by email, login by policy number, registration and
//! token refresh. Every success ends in a fresh [`TokenPair`].

use std::{fmt, sync::Arc};

use hospital_core::{
  patient::Patient,
  store::{PatientStore, Repository},
  validate,
};
use serde::Deserialize;

use crate::{
  Error, Result, credential,
  patients::create_patient,
  token::{TokenIssuer, TokenPair},
};

// ─── Registration ────────────────────────────────────────────────────────────

/// Profile fields plus the plaintext password, as submitted on sign-up.
#[derive(Clone, Deserialize)]
pub struct Registration {
  pub email:         String,
  pub name:          String,
  pub surname:       String,
  #[serde(default)]
  pub patronymic:    Option<String>,
  pub age:           u8,
  pub gender:        String,
  #[serde(default)]
  pub phone_number:  Option<String>,
  #[serde(default)]
  pub address:       Option<String>,
  pub password:      String,
  pub policy_number: String,
}

impl Registration {
  pub fn validate(&self) -> hospital_core::Result<()> {
    validate::email(&self.email)?;
    validate::non_empty("name", &self.name)?;
    validate::non_empty("surname", &self.surname)?;
    validate::non_empty("gender", &self.gender)?;
    validate::non_empty("password", &self.password)?;
    validate::non_empty("policy_number", &self.policy_number)?;
    Ok(())
  }
}

// Never print the plaintext password.
impl fmt::Debug for Registration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registration")
      .field("email", &self.email)
      .field("name", &self.name)
      .field("surname", &self.surname)
      .field("policy_number", &self.policy_number)
      .field("password", &"<redacted>")
      .finish_non_exhaustive()
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct AuthService<S> {
  store:  Arc<S>,
  tokens: Arc<TokenIssuer>,
}

impl<S> Clone for AuthService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), tokens: Arc::clone(&self.tokens) }
  }
}

impl<S: PatientStore> AuthService<S> {
  pub fn new(store: Arc<S>, tokens: Arc<TokenIssuer>) -> Self { Self { store, tokens } }

  pub async fn auth_by_email(&self, email: &str, password: &str) -> Result<TokenPair> {
    tracing::debug!(email, "login by email");
    let patient = self
      .store
      .find_by_email(email)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(Error::not_found::<Patient>)?;
    self.login(&patient, password)
  }

  pub async fn auth_by_policy_number(
    &self,
    policy_number: &str,
    password: &str,
  ) -> Result<TokenPair> {
    tracing::debug!("login by policy number");
    let patient = self
      .store
      .find_by_policy_number(policy_number)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(Error::not_found::<Patient>)?;
    self.login(&patient, password)
  }

  /// Create a patient and log them straight in.
  ///
  /// Email uniqueness is checked before policy-number uniqueness, and both
  /// before anything is hashed or written.
  pub async fn register(&self, input: Registration) -> Result<TokenPair> {
    tracing::debug!(email = %input.email, "registering patient");
    let patient = create_patient(&*self.store, input).await?;
    tracing::info!(id = patient.id, "patient registered");
    self.issue(&patient)
  }

  /// Trade a valid refresh token for a new pair. Any problem with the token
  /// itself is reported as [`Error::InvalidCredentials`].
  pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
    let claims = self.tokens.verify_refresh(refresh_token).map_err(|e| {
      tracing::warn!(error = %e, "rejected refresh token");
      Error::InvalidCredentials
    })?;
    let patient = Repository::<Patient>::get(&*self.store, claims.id)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(Error::not_found::<Patient>)?;
    tracing::debug!(id = patient.id, "refreshing tokens");
    self.issue(&patient)
  }

  fn login(&self, patient: &Patient, password: &str) -> Result<TokenPair> {
    if !credential::verify(&patient.password_hash, password) {
      tracing::warn!(id = patient.id, "wrong password");
      return Err(Error::InvalidCredentials);
    }
    tracing::info!(id = patient.id, "patient logged in");
    self.issue(patient)
  }

  fn issue(&self, patient: &Patient) -> Result<TokenPair> {
    self.tokens.issue_pair(patient).inspect_err(|e| {
      tracing::error!(id = patient.id, error = %e, "token signing failed");
    })
  }
}
