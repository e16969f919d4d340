//! Portfolios: a doctor's credentials and experience.

use serde::{Deserialize, Serialize};

use crate::{Id, store::Entity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
  pub id:              Id,
  pub education:       String,
  #[serde(default)]
  pub awards:          String,
  /// Years of work experience.
  pub work_experience: u8,
}

impl Entity for Portfolio {
  type New = NewPortfolio;
  type Changes = NewPortfolio;

  const NAME: &'static str = "portfolio";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPortfolio {
  pub education:       String,
  #[serde(default)]
  pub awards:          String,
  pub work_experience: u8,
}
