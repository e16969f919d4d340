//! Doctors: care providers, each linked to one specialization and at most
//! one portfolio.

use serde::{Deserialize, Serialize};

use crate::{Id, Result, store::Entity, validate};

/// A persisted doctor row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
  pub id:                Id,
  pub name:              String,
  pub surname:           String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patronymic:        Option<String>,
  pub image_id:          Id,
  pub gender:            String,
  pub rating:            f32,
  pub age:               u8,
  /// Whether new appointment records may reference this doctor.
  #[serde(rename = "recording_is_available")]
  pub available:         bool,
  pub specialization_id: Id,
  /// Unique among doctors.
  pub portfolio_id:      Id,
}

impl Entity for Doctor {
  type New = NewDoctor;
  type Changes = NewDoctor;

  const NAME: &'static str = "doctor";
}

/// Input for creating a doctor, and the full-replacement shape for updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDoctor {
  pub name:              String,
  pub surname:           String,
  #[serde(default)]
  pub patronymic:        Option<String>,
  pub image_id:          Id,
  pub gender:            String,
  pub rating:            f32,
  pub age:               u8,
  #[serde(rename = "recording_is_available")]
  pub available:         bool,
  pub specialization_id: Id,
  pub portfolio_id:      Id,
}

impl NewDoctor {
  pub fn validate(&self) -> Result<()> {
    validate::non_empty("name", &self.name)?;
    validate::non_empty("surname", &self.surname)?;
    validate::non_empty("gender", &self.gender)?;
    validate::rating(self.rating)?;
    validate::id(self.specialization_id)?;
    validate::id(self.portfolio_id)?;
    Ok(())
  }
}
