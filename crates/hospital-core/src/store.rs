//! The generic [`Repository`] trait and the entity-specific store traits.
//!
//! Storage backends (e.g. `hospital-store-sqlite`) implement these traits.
//! The service layer depends on this abstraction, never on a concrete
//! backend.
//!
//! "Absent" is always expressed as `Ok(None)` or `Ok(false)`; an `Err` is
//! reserved for genuine failures (connection loss, timeouts, constraint
//! violations).

use std::{fmt, future::Future};

use crate::{
  Id,
  doctor::Doctor,
  patient::Patient,
  record::{NewRecord, Record},
};

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A persisted row type with a storage-assigned [`Id`].
pub trait Entity: Clone + Send + Sync + 'static {
  /// Input to [`Repository::create`]. The store assigns the id.
  type New: Send + 'static;
  /// Input to [`Repository::update`]; replaces every mutable field.
  type Changes: Send + 'static;

  /// Human-readable entity name, used in `NotFound` errors and logs.
  const NAME: &'static str;
}

// ─── Error classification ────────────────────────────────────────────────────

/// A column whose uniqueness is enforced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
  Email,
  PolicyNumber,
  PortfolioId,
}

impl fmt::Display for UniqueField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Email => "email",
      Self::PolicyNumber => "policy_number",
      Self::PortfolioId => "portfolio_id",
    })
  }
}

/// What the service layer is allowed to learn about a backend error.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The unique column that rejected a write, if that is why it failed.
  fn unique_violation(&self) -> Option<UniqueField>;
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// Generic CRUD over a single entity type.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait Repository<E: Entity>: Send + Sync {
  type Error: StoreError;

  /// Persist a new row and return it with its assigned id.
  fn create(
    &self,
    input: E::New,
  ) -> impl Future<Output = Result<E, Self::Error>> + Send + '_;

  /// Fetch one row. Returns `None` if not found.
  fn get(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;

  /// All rows, ordered by id.
  fn list(&self) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// Replace the mutable fields of a row. Returns `None` if not found.
  fn update(
    &self,
    id: Id,
    changes: E::Changes,
  ) -> impl Future<Output = Result<Option<E>, Self::Error>> + Send + '_;

  /// Delete one row. Returns `false` if it did not exist.
  fn delete(
    &self,
    id: Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Entity-specific lookups ─────────────────────────────────────────────────

/// Patient storage: email and policy number are unique keys.
pub trait PatientStore: Repository<Patient> {
  fn find_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Patient>, Self::Error>> + Send + 'a;

  fn find_by_policy_number<'a>(
    &'a self,
    policy_number: &'a str,
  ) -> impl Future<Output = Result<Option<Patient>, Self::Error>> + Send + 'a;
}

/// Doctor storage: a portfolio belongs to at most one doctor.
pub trait DoctorStore: Repository<Doctor> {
  fn find_by_portfolio_id(
    &self,
    portfolio_id: Id,
  ) -> impl Future<Output = Result<Option<Doctor>, Self::Error>> + Send + '_;

  /// Doctors of one specialization whose availability flag is set.
  fn list_available(
    &self,
    specialization_id: Id,
  ) -> impl Future<Output = Result<Vec<Doctor>, Self::Error>> + Send + '_;
}

/// Appointment record storage.
pub trait RecordStore: Repository<Record> {
  fn list_by_patient(
    &self,
    patient_id: Id,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Insert `input` only if its doctor exists and is available at the
  /// moment of the write, as one atomic statement.
  ///
  /// Returns `None` when the condition did not hold and nothing was written.
  fn create_if_doctor_available(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + '_;
}

/// Everything the HTTP layer needs from one backend.
pub trait HospitalStore: PatientStore + DoctorStore + RecordStore + 'static {}

impl<T> HospitalStore for T where T: PatientStore + DoctorStore + RecordStore + 'static {}
