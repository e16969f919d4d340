//! Password hashing with argon2.
//!
//! Hashes are PHC strings (`$argon2id$v=19$…`) carrying their own salt and
//! parameters, so [`verify`] needs nothing but the stored string.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand_core::OsRng;

use crate::{Error, Result};

/// Hash `plaintext` under a fresh random salt.
pub fn hash(plaintext: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  let hash = Argon2::default()
    .hash_password(plaintext.as_bytes(), &salt)
    .map_err(|e| Error::PasswordHash(e.to_string()))?
    .to_string();
  Ok(hash)
}

/// True only if `plaintext` matches `hash`. A malformed hash never matches.
pub fn verify(hash: &str, plaintext: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(hash) else {
    tracing::warn!("stored password hash is not a valid PHC string");
    return false;
  };
  Argon2::default()
    .verify_password(plaintext.as_bytes(), &parsed)
    .is_ok()
}
