//! Doctor administration: portfolio uniqueness and the availability listing.

use std::sync::Arc;

use hospital_core::{
  Id,
  doctor::{Doctor, NewDoctor},
  store::{DoctorStore, Repository},
  validate,
};

use crate::{Error, Result};

pub struct DoctorService<S> {
  store: Arc<S>,
}

impl<S> Clone for DoctorService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: DoctorStore> DoctorService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn create(&self, input: NewDoctor) -> Result<Doctor> {
    input.validate()?;
    self.ensure_portfolio_free(input.portfolio_id, None).await?;

    let doctor = Repository::<Doctor>::create(&*self.store, input)
      .await
      .map_err(Error::from_store)?;
    tracing::info!(id = doctor.id, "doctor created");
    Ok(doctor)
  }

  /// Full replacement; this is how availability is switched on and off.
  pub async fn update(&self, id: Id, changes: NewDoctor) -> Result<Doctor> {
    let id = validate::id(id)?;
    changes.validate()?;
    self.ensure_portfolio_free(changes.portfolio_id, Some(id)).await?;

    let doctor = Repository::<Doctor>::update(&*self.store, id, changes)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(Error::not_found::<Doctor>)?;
    tracing::info!(id, available = doctor.available, "doctor updated");
    Ok(doctor)
  }

  pub async fn list_available(&self, specialization_id: Id) -> Result<Vec<Doctor>> {
    let specialization_id = validate::id(specialization_id)?;
    self
      .store
      .list_available(specialization_id)
      .await
      .map_err(Error::from_store)
  }

  async fn ensure_portfolio_free(&self, portfolio_id: Id, except: Option<Id>) -> Result<()> {
    let holder = self
      .store
      .find_by_portfolio_id(portfolio_id)
      .await
      .map_err(Error::from_store)?;
    match holder {
      Some(d) if Some(d.id) != except => {
        tracing::warn!(portfolio_id, "portfolio already assigned");
        Err(Error::RepeatedPortfolioId)
      }
      _ => Ok(()),
    }
  }
}
