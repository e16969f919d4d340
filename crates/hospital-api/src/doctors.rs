//! Handlers for `/doctors` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/doctors` | 201; 400 if the portfolio is taken |
//! | `PUT`  | `/doctors/{id}` | Full update, e.g. toggling availability |
//! | `GET`  | `/doctors/available/{specialization_id}` | |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use hospital_core::{
  Id,
  doctor::{Doctor, NewDoctor},
  store::HospitalStore,
};

use crate::{AppState, error::ApiError, extract};

/// `POST /doctors`
pub async fn create<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Json(body): extract::Json<NewDoctor>,
) -> Result<impl IntoResponse, ApiError> {
  let doctor = state.doctors.create(body).await?;
  Ok((StatusCode::CREATED, Json(doctor)))
}

/// `PUT /doctors/{id}`
pub async fn update<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Path(id): extract::Path<Id>,
  extract::Json(body): extract::Json<NewDoctor>,
) -> Result<Json<Doctor>, ApiError> {
  Ok(Json(state.doctors.update(id, body).await?))
}

/// `GET /doctors/available/{specialization_id}`
pub async fn available<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Path(specialization_id): extract::Path<Id>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
  Ok(Json(state.doctors.list_available(specialization_id).await?))
}
