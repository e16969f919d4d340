//! Patients, the identity and account entity.
//!
//! The stored password is always an argon2 PHC string. It is never
//! serialised: [`Patient`] skips it on output and [`PatientProfile`] does not
//! carry it at all.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Id, store::Entity};

// ─── Patient ─────────────────────────────────────────────────────────────────

/// A persisted patient row.
#[derive(Clone, Serialize)]
pub struct Patient {
  pub id:            Id,
  pub email:         String,
  pub name:          String,
  pub surname:       String,
  pub patronymic:    Option<String>,
  pub age:           u8,
  pub gender:        String,
  pub phone_number:  Option<String>,
  pub address:       Option<String>,
  #[serde(skip)]
  pub password_hash: String,
  pub policy_number: String,
  /// Diseases the patient has been diagnosed with.
  pub disease_ids:   Vec<Id>,
  /// Storage-assigned; never changes after creation.
  pub created_at:    DateTime<Utc>,
}

impl Patient {
  /// The fields that may leave the server, e.g. inside an access token.
  pub fn profile(&self) -> PatientProfile {
    PatientProfile {
      id:            self.id,
      email:         self.email.clone(),
      name:          self.name.clone(),
      surname:       self.surname.clone(),
      patronymic:    self.patronymic.clone(),
      age:           self.age,
      gender:        self.gender.clone(),
      phone_number:  self.phone_number.clone(),
      address:       self.address.clone(),
      policy_number: self.policy_number.clone(),
    }
  }
}

// Hand-written so a stray `{:?}` never prints the hash.
impl fmt::Debug for Patient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Patient")
      .field("id", &self.id)
      .field("email", &self.email)
      .field("name", &self.name)
      .field("surname", &self.surname)
      .field("patronymic", &self.patronymic)
      .field("age", &self.age)
      .field("gender", &self.gender)
      .field("phone_number", &self.phone_number)
      .field("address", &self.address)
      .field("password_hash", &"<redacted>")
      .field("policy_number", &self.policy_number)
      .field("disease_ids", &self.disease_ids)
      .field("created_at", &self.created_at)
      .finish()
  }
}

impl Entity for Patient {
  type New = NewPatient;
  type Changes = PatientChanges;

  const NAME: &'static str = "patient";
}

// ─── PatientProfile ──────────────────────────────────────────────────────────

/// The public face of a patient: every field except the password hash,
/// the disease list and the creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
  pub id:            Id,
  pub email:         String,
  pub name:          String,
  pub surname:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patronymic:    Option<String>,
  pub age:           u8,
  pub gender:        String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone_number:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address:       Option<String>,
  pub policy_number: String,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`crate::store::Repository::create`] for patients.
/// `id` and `created_at` are always set by the store.
#[derive(Clone)]
pub struct NewPatient {
  pub email:         String,
  pub name:          String,
  pub surname:       String,
  pub patronymic:    Option<String>,
  pub age:           u8,
  pub gender:        String,
  pub phone_number:  Option<String>,
  pub address:       Option<String>,
  pub password_hash: String,
  pub policy_number: String,
}

/// Full replacement of a patient's mutable fields.
#[derive(Clone)]
pub struct PatientChanges {
  pub email:         String,
  pub name:          String,
  pub surname:       String,
  pub patronymic:    Option<String>,
  pub age:           u8,
  pub gender:        String,
  pub phone_number:  Option<String>,
  pub address:       Option<String>,
  pub password_hash: String,
  pub policy_number: String,
  pub disease_ids:   Vec<Id>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn patient() -> Patient {
    Patient {
      id:            7,
      email:         "a@x.com".into(),
      name:          "Maksim".into(),
      surname:       "Petrov".into(),
      patronymic:    None,
      age:           20,
      gender:        "male".into(),
      phone_number:  Some("85555555555".into()),
      address:       None,
      password_hash: "$argon2id$v=19$secret".into(),
      policy_number: "111".into(),
      disease_ids:   vec![3],
      created_at:    Utc::now(),
    }
  }

  #[test]
  fn serialised_patient_has_no_password() {
    let json = serde_json::to_value(patient()).unwrap();
    assert!(json.get("password_hash").is_none());
    assert!(!json.to_string().contains("argon2"));
    assert_eq!(json["policy_number"], "111");
  }

  #[test]
  fn debug_output_redacts_hash() {
    let dbg = format!("{:?}", patient());
    assert!(!dbg.contains("argon2"));
    assert!(dbg.contains("<redacted>"));
  }

  #[test]
  fn profile_copies_public_fields() {
    let p = patient();
    let profile = p.profile();
    assert_eq!(profile.id, 7);
    assert_eq!(profile.email, "a@x.com");
    assert_eq!(profile.phone_number.as_deref(), Some("85555555555"));

    let json = serde_json::to_value(&profile).unwrap();
    let keys: Vec<&str> =
      json.as_object().unwrap().keys().map(String::as_str).collect();
    assert!(!keys.contains(&"patronymic"), "absent optionals are omitted");
    assert!(!keys.contains(&"disease_ids"));
    assert!(!keys.contains(&"created_at"));
  }
}
