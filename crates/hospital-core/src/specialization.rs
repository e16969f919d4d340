//! Specializations: medical discipline classifications.

use serde::{Deserialize, Serialize};

use crate::{Id, store::Entity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialization {
  pub id:   Id,
  #[serde(rename = "name_specialization")]
  pub name: String,
}

impl Entity for Specialization {
  type New = NewSpecialization;
  type Changes = NewSpecialization;

  const NAME: &'static str = "specialization";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpecialization {
  #[serde(rename = "name_specialization")]
  pub name: String,
}
