//! Handlers for `/records` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/records` | Booking; 201, or 400 if the doctor is unavailable |
//! | `PUT`  | `/records/{id}` | Full update; availability is not re-checked |
//! | `GET`  | `/records/patient/{patient_id}` | |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use hospital_core::{
  Id,
  record::{NewRecord, Record},
  store::HospitalStore,
};

use crate::{AppState, error::ApiError, extract};

/// `POST /records`
pub async fn create<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Json(body): extract::Json<NewRecord>,
) -> Result<impl IntoResponse, ApiError> {
  let record = state.booking.create_record(body).await?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PUT /records/{id}`
pub async fn update<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Path(id): extract::Path<Id>,
  extract::Json(body): extract::Json<NewRecord>,
) -> Result<Json<Record>, ApiError> {
  Ok(Json(state.booking.update_record(id, body).await?))
}

/// `GET /records/patient/{patient_id}`
pub async fn for_patient<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Path(patient_id): extract::Path<Id>,
) -> Result<Json<Vec<Record>>, ApiError> {
  Ok(Json(state.booking.records_for_patient(patient_id).await?))
}
