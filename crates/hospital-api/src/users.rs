//! Handlers for `/users` endpoints. Responses never include the password.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Same body as sign-up; 201 with the patient |
//! | `GET`  | `/users/{id}` | 404 if not found |
//! | `PUT`  | `/users/{id}` | Full update; `password` optional |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use hospital_core::{Id, patient::Patient, store::HospitalStore};
use hospital_service::{PatientUpdate, Registration};

use crate::{AppState, error::ApiError, extract};

/// `POST /users`
pub async fn create<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Json(body): extract::Json<Registration>,
) -> Result<impl IntoResponse, ApiError> {
  let patient = state.patients.create(body).await?;
  Ok((StatusCode::CREATED, Json(patient)))
}

/// `GET /users/{id}`
pub async fn get_one<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Path(id): extract::Path<Id>,
) -> Result<Json<Patient>, ApiError> {
  Ok(Json(state.patients.get(id).await?))
}

/// `PUT /users/{id}`
pub async fn update<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Path(id): extract::Path<Id>,
  extract::Json(body): extract::Json<PatientUpdate>,
) -> Result<Json<Patient>, ApiError> {
  Ok(Json(state.patients.update(id, body).await?))
}
