//! Appointment booking, gated on the doctor's availability flag.

use std::sync::Arc;

use hospital_core::{
  Id,
  doctor::Doctor,
  patient::Patient,
  record::{NewRecord, Record},
  store::{DoctorStore, PatientStore, RecordStore, Repository},
  validate,
};

use crate::{Error, Result};

pub struct BookingService<S> {
  store: Arc<S>,
}

impl<S> Clone for BookingService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PatientStore + DoctorStore + RecordStore> BookingService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Persist `input` if its doctor is available.
  ///
  /// The read here is only the fast path. The insert itself re-checks the
  /// flag atomically, so a doctor made unavailable in between still yields
  /// [`Error::DoctorNotAvailable`] and nothing is written.
  pub async fn create_record(&self, input: NewRecord) -> Result<Record> {
    input.validate()?;
    let doctor_id = input.doctor_id;
    tracing::debug!(doctor_id, patient_id = input.patient_id, "booking record");

    let doctor = self.doctor(doctor_id).await?;
    if !doctor.available {
      tracing::warn!(doctor_id, "doctor is not available");
      return Err(Error::DoctorNotAvailable);
    }
    self.ensure_patient(input.patient_id).await?;

    let record = self
      .store
      .create_if_doctor_available(input)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(|| {
        tracing::warn!(doctor_id, "doctor became unavailable before the insert");
        Error::DoctorNotAvailable
      })?;

    tracing::info!(id = record.id, doctor_id, "record booked");
    Ok(record)
  }

  /// Full replacement of a record.
  ///
  /// Availability is NOT re-validated here; only existence of the doctor
  /// and the patient is.
  pub async fn update_record(&self, id: Id, changes: NewRecord) -> Result<Record> {
    let id = validate::id(id)?;
    changes.validate()?;
    let doctor_id = changes.doctor_id;

    let doctor = self.doctor(doctor_id).await?;
    if !doctor.available {
      tracing::warn!(id, doctor_id, "record now references an unavailable doctor");
    }
    self.ensure_patient(changes.patient_id).await?;

    let record = Repository::<Record>::update(&*self.store, id, changes)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(Error::not_found::<Record>)?;
    tracing::info!(id, "record updated");
    Ok(record)
  }

  pub async fn records_for_patient(&self, patient_id: Id) -> Result<Vec<Record>> {
    let patient_id = validate::id(patient_id)?;
    self
      .store
      .list_by_patient(patient_id)
      .await
      .map_err(Error::from_store)
  }

  /// A record must never point at a doctor that does not exist; treat it as
  /// a data-integrity failure and refuse.
  async fn doctor(&self, id: Id) -> Result<Doctor> {
    Repository::<Doctor>::get(&*self.store, id)
      .await
      .map_err(Error::from_store)?
      .ok_or_else(|| {
        tracing::error!(doctor_id = id, "record references a doctor that does not exist");
        Error::not_found::<Doctor>()
      })
  }

  async fn ensure_patient(&self, id: Id) -> Result<()> {
    Repository::<Patient>::get(&*self.store, id)
      .await
      .map_err(Error::from_store)?
      .map(|_| ())
      .ok_or_else(|| {
        tracing::warn!(patient_id = id, "record references an unknown patient");
        Error::not_found::<Patient>()
      })
  }
}
