//! Diseases, referenced from patients.

use serde::{Deserialize, Serialize};

use crate::{Id, store::Entity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
  pub id:          Id,
  pub body_part:   String,
  pub description: String,
}

impl Entity for Disease {
  type New = NewDisease;
  type Changes = NewDisease;

  const NAME: &'static str = "disease";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDisease {
  pub body_part:   String,
  pub description: String,
}
