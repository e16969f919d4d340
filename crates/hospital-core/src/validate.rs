//! Shape checks applied to request inputs before any storage call.
//!
//! These are deliberately shallow: they reject values that can never be
//! valid, and leave uniqueness and existence to the service layer.

use crate::{Error, Id, Result};

/// Reject empty or whitespace-only strings.
pub fn non_empty(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::EmptyField(field));
  }
  Ok(())
}

/// A minimal `local@domain` check; deliverability is not our concern.
pub fn email(value: &str) -> Result<()> {
  non_empty("email", value)?;
  let valid = match value.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
    }
    None => false,
  };
  if !valid {
    return Err(Error::InvalidEmail(value.to_owned()));
  }
  Ok(())
}

/// Doctor ratings live on a five-point scale.
pub fn rating(value: f32) -> Result<()> {
  if !(0.0..=5.0).contains(&value) {
    return Err(Error::RatingOutOfRange(value));
  }
  Ok(())
}

/// Storage ids start at 1.
pub fn id(value: Id) -> Result<Id> {
  if value < 1 {
    return Err(Error::InvalidId(value));
  }
  Ok(value)
}
