//! Appointment records: a scheduled visit linking a patient, a doctor and
//! a specialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Id, Result, store::Entity, validate};

/// A persisted appointment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  pub id:                Id,
  pub hospital_address:  String,
  pub doctor_office:     String,
  /// Free-text notes for the patient, e.g. "no food 3 hours before".
  pub tagging:           String,
  #[serde(rename = "patients_id")]
  pub patient_id:        Id,
  pub doctor_id:         Id,
  pub specialization_id: Id,
  pub time_record:       DateTime<Utc>,
}

impl Entity for Record {
  type New = NewRecord;
  type Changes = NewRecord;

  const NAME: &'static str = "record";
}

/// Booking input, persisted verbatim once the doctor is confirmed
/// available. Also the full-replacement shape for updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
  pub hospital_address:  String,
  pub doctor_office:     String,
  #[serde(default)]
  pub tagging:           String,
  #[serde(rename = "patients_id")]
  pub patient_id:        Id,
  pub doctor_id:         Id,
  pub specialization_id: Id,
  pub time_record:       DateTime<Utc>,
}

impl NewRecord {
  pub fn validate(&self) -> Result<()> {
    validate::non_empty("hospital_address", &self.hospital_address)?;
    validate::non_empty("doctor_office", &self.doctor_office)?;
    validate::id(self.patient_id)?;
    validate::id(self.doctor_id)?;
    validate::id(self.specialization_id)?;
    Ok(())
  }
}
