//! Patient administration: create, read and full update.

use std::{fmt, sync::Arc};

use hospital_core::{
  Id,
  patient::{NewPatient, Patient, PatientChanges},
  store::{PatientStore, Repository},
  validate,
};
use serde::Deserialize;

use crate::{Error, Result, auth::Registration, credential};

// ─── Shared rules ────────────────────────────────────────────────────────────

/// Reject `email` or `policy_number` if another patient already holds it.
///
/// Email is checked first. `except` names the patient being updated, whose
/// own values do not count as collisions.
pub(crate) async fn ensure_unique<S: PatientStore>(
  store: &S,
  email: &str,
  policy_number: &str,
  except: Option<Id>,
) -> Result<()> {
  let held_by_other = |p: &Patient| Some(p.id) != except;

  if let Some(p) = store.find_by_email(email).await.map_err(Error::from_store)?
    && held_by_other(&p)
  {
    tracing::warn!("email already registered");
    return Err(Error::RepeatedEmail);
  }
  if let Some(p) = store
    .find_by_policy_number(policy_number)
    .await
    .map_err(Error::from_store)?
    && held_by_other(&p)
  {
    tracing::warn!("policy number already registered");
    return Err(Error::RepeatedPolicyNumber);
  }
  Ok(())
}

/// Validate, check uniqueness, hash the password, then persist.
///
/// The UNIQUE indexes behind the store remain the final word: a concurrent
/// registration that slips past the lookups still fails as `Repeated*`.
pub(crate) async fn create_patient<S: PatientStore>(
  store: &S,
  input: Registration,
) -> Result<Patient> {
  input.validate()?;
  ensure_unique(store, &input.email, &input.policy_number, None).await?;

  let password_hash = credential::hash(&input.password)?;
  let new = NewPatient {
    email: input.email,
    name: input.name,
    surname: input.surname,
    patronymic: input.patronymic,
    age: input.age,
    gender: input.gender,
    phone_number: input.phone_number,
    address: input.address,
    password_hash,
    policy_number: input.policy_number,
  };
  Repository::<Patient>::create(store, new)
    .await
    .map_err(Error::from_store)
}

// ─── PatientUpdate ───────────────────────────────────────────────────────────

/// Full replacement of a patient. The password is re-hashed when present and
/// left untouched when absent.
#[derive(Clone, Deserialize)]
pub struct PatientUpdate {
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
  #[serde(default)]
  pub password:      Option<String>,
  pub policy_number: String,
  #[serde(default)]
  pub disease_ids:   Vec<Id>,
}

impl PatientUpdate {
  pub fn validate(&self) -> hospital_core::Result<()> {
    validate::email(&self.email)?;
    validate::non_empty("name", &self.name)?;
    validate::non_empty("surname", &self.surname)?;
    validate::non_empty("gender", &self.gender)?;
    validate::non_empty("policy_number", &self.policy_number)?;
    if let Some(password) = &self.password {
      validate::non_empty("password", password)?;
    }
    for id in &self.disease_ids {
      validate::id(*id)?;
    }
    Ok(())
  }
}

impl fmt::Debug for PatientUpdate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PatientUpdate")
      .field("email", &self.email)
      .field("policy_number", &self.policy_number)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .finish_non_exhaustive()
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct PatientService<S> {
  store: Arc<S>,
}

impl<S> Clone for PatientService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PatientStore> PatientService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Administrative creation: the same rules as registration, without
  /// issuing tokens.
  pub async fn create(&self, input: Registration) -> Result<Patient> {
    tracing::debug!(email = %input.email, "creating patient");
    let patient = create_patient(&*self.store, input).await?;
    tracing::info!(id = patient.id, "patient created");
    Ok(patient)
  }

  pub async fn get(&self, id: Id) -> Result<Patient> {
    let id = validate::id(id)?;
    Repository::<Patient>::get(&*self.store, id)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(Error::not_found::<Patient>)
  }

  pub async fn update(&self, id: Id, input: PatientUpdate) -> Result<Patient> {
    let id = validate::id(id)?;
    input.validate()?;
    tracing::debug!(id, "updating patient");

    let existing = self.get(id).await?;
    ensure_unique(&*self.store, &input.email, &input.policy_number, Some(id)).await?;

    let password_hash = match &input.password {
      Some(password) => credential::hash(password)?,
      None => existing.password_hash,
    };
    let changes = PatientChanges {
      email: input.email,
      name: input.name,
      surname: input.surname,
      patronymic: input.patronymic,
      age: input.age,
      gender: input.gender,
      phone_number: input.phone_number,
      address: input.address,
      password_hash,
      policy_number: input.policy_number,
      disease_ids: input.disease_ids,
    };

    let patient = Repository::<Patient>::update(&*self.store, id, changes)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(Error::not_found::<Patient>)?;
    tracing::info!(id, "patient updated");
    Ok(patient)
  }
}
