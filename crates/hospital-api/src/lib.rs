//! JSON REST API for the hospital record system.
//!
//! Exposes an axum [`Router`] backed by any [`HospitalStore`]. Handlers only
//! decode, call a service and encode; every rule lives in
//! `hospital-service`. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = hospital_api::api_router(AppState::new(store, tokens));
//! ```

pub mod auth;
pub mod doctors;
pub mod error;
pub mod extract;
pub mod records;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use hospital_core::store::HospitalStore;
use hospital_service::{
  AuthService, BookingService, DoctorService, PatientService, TokenIssuer,
};

pub use error::ApiError;

/// Path prefix every route is mounted under.
pub const BASE_PATH: &str = "/hospital_record";

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub auth:     AuthService<S>,
  pub patients: PatientService<S>,
  pub doctors:  DoctorService<S>,
  pub booking:  BookingService<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      auth:     self.auth.clone(),
      patients: self.patients.clone(),
      doctors:  self.doctors.clone(),
      booking:  self.booking.clone(),
    }
  }
}

impl<S: HospitalStore> AppState<S> {
  /// Wire every service to the same store.
  pub fn new(store: Arc<S>, tokens: Arc<TokenIssuer>) -> Self {
    Self {
      auth:     AuthService::new(Arc::clone(&store), tokens),
      patients: PatientService::new(Arc::clone(&store)),
      doctors:  DoctorService::new(Arc::clone(&store)),
      booking:  BookingService::new(store),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router with every route nested under [`BASE_PATH`].
pub fn api_router<S: HospitalStore>(state: AppState<S>) -> Router<()> {
  let routes = Router::new()
    // Authentication
    .route("/user/auth/email", post(auth::by_email::<S>))
    .route("/user/auth/policy", post(auth::by_policy_number::<S>))
    .route("/user/auth/refresh", post(auth::refresh::<S>))
    .route("/user/sign_up", post(auth::sign_up::<S>))
    // Patients
    .route("/users", post(users::create::<S>))
    .route("/users/{id}", get(users::get_one::<S>).put(users::update::<S>))
    // Doctors
    .route("/doctors", post(doctors::create::<S>))
    .route("/doctors/{id}", put(doctors::update::<S>))
    .route("/doctors/available/{specialization_id}", get(doctors::available::<S>))
    // Records
    .route("/records", post(records::create::<S>))
    .route("/records/{id}", put(records::update::<S>))
    .route("/records/patient/{patient_id}", get(records::for_patient::<S>));

  Router::new().nest(BASE_PATH, routes).with_state(state)
}
