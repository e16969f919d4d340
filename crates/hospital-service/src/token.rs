//! Signed, time-bounded access and refresh tokens (HS256 JWTs).
//!
//! The two kinds use separate secrets and separate claim shapes, so neither
//! can be replayed as the other.

use std::fmt;

use chrono::{Duration, Utc};
use hospital_core::{
  Id,
  patient::{Patient, PatientProfile},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Config ──────────────────────────────────────────────────────────────────

/// Secrets and lifetimes, read from the `[jwt]` config table.
#[derive(Clone, Deserialize)]
pub struct TokenConfig {
  pub access_secret:             String,
  pub access_expiration_minutes: u32,
  pub refresh_secret:            String,
  pub refresh_expiration_days:   u32,
}

impl fmt::Debug for TokenConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokenConfig")
      .field("access_secret", &"<redacted>")
      .field("access_expiration_minutes", &self.access_expiration_minutes)
      .field("refresh_secret", &"<redacted>")
      .field("refresh_expiration_days", &self.refresh_expiration_days)
      .finish()
  }
}

// ─── Claims ──────────────────────────────────────────────────────────────────

/// Access-token payload: the patient's public profile and an expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
  pub user: PatientProfile,
  /// Seconds since the Unix epoch.
  pub exp:  i64,
}

/// Refresh-token payload: nothing but the patient id and an expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
  pub id:  Id,
  pub exp: i64,
}

/// What every successful authentication returns.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
  pub access_token:  String,
  pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TokenPair").finish_non_exhaustive()
  }
}

// ─── Issuer ──────────────────────────────────────────────────────────────────

pub struct TokenIssuer {
  access_encoding:  EncodingKey,
  access_decoding:  DecodingKey,
  access_ttl:       Duration,
  refresh_encoding: EncodingKey,
  refresh_decoding: DecodingKey,
  refresh_ttl:      Duration,
  validation:       Validation,
}

impl TokenIssuer {
  pub fn new(config: &TokenConfig) -> Self {
    Self {
      access_encoding:  EncodingKey::from_secret(config.access_secret.as_bytes()),
      access_decoding:  DecodingKey::from_secret(config.access_secret.as_bytes()),
      access_ttl:       Duration::minutes(i64::from(config.access_expiration_minutes)),
      refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
      refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
      refresh_ttl:      Duration::days(i64::from(config.refresh_expiration_days)),
      validation:       Validation::new(Algorithm::HS256),
    }
  }

  /// A token carrying `patient`'s public profile, valid for the configured
  /// number of minutes.
  pub fn issue_access(&self, patient: &Patient) -> Result<String> {
    let claims = AccessClaims {
      user: patient.profile(),
      exp:  expiry(self.access_ttl)?,
    };
    Ok(jsonwebtoken::encode(
      &Header::new(Algorithm::HS256),
      &claims,
      &self.access_encoding,
    )?)
  }

  /// A token carrying only `patient`'s id, valid for the configured number
  /// of days.
  pub fn issue_refresh(&self, patient: &Patient) -> Result<String> {
    let claims = RefreshClaims {
      id:  patient.id,
      exp: expiry(self.refresh_ttl)?,
    };
    Ok(jsonwebtoken::encode(
      &Header::new(Algorithm::HS256),
      &claims,
      &self.refresh_encoding,
    )?)
  }

  pub fn issue_pair(&self, patient: &Patient) -> Result<TokenPair> {
    Ok(TokenPair {
      access_token:  self.issue_access(patient)?,
      refresh_token: self.issue_refresh(patient)?,
    })
  }

  /// Check signature and expiry of an access token.
  pub fn verify_access(&self, token: &str) -> Result<AccessClaims> {
    let data =
      jsonwebtoken::decode::<AccessClaims>(token, &self.access_decoding, &self.validation)?;
    Ok(data.claims)
  }

  /// Check signature and expiry of a refresh token.
  pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims> {
    let data =
      jsonwebtoken::decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)?;
    Ok(data.claims)
  }
}

/// Unix timestamp `ttl` from now.
fn expiry(ttl: Duration) -> Result<i64> {
  Utc::now()
    .checked_add_signed(ttl)
    .map(|at| at.timestamp())
    .ok_or(Error::TokenLifetime)
}
