//! Handlers for `/user/auth/*` and `/user/sign_up`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/user/auth/email` | Body: `{"email", "password"}` |
//! | `POST` | `/user/auth/policy` | Body: `{"policy_number", "password"}` |
//! | `POST` | `/user/auth/refresh` | Body: `{"refresh_token"}` |
//! | `POST` | `/user/sign_up` | Body: profile fields plus `password`; 201 |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use hospital_core::store::HospitalStore;
use hospital_service::{Registration, TokenPair};
use serde::Deserialize;

use crate::{AppState, error::ApiError, extract};

#[derive(Deserialize)]
pub struct EmailLogin {
  pub email:    String,
  pub password: String,
}

#[derive(Deserialize)]
pub struct PolicyLogin {
  pub policy_number: String,
  pub password:      String,
}

#[derive(Deserialize)]
pub struct RefreshBody {
  pub refresh_token: String,
}

/// `POST /user/auth/email`
pub async fn by_email<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Json(body): extract::Json<EmailLogin>,
) -> Result<Json<TokenPair>, ApiError> {
  let pair = state.auth.auth_by_email(&body.email, &body.password).await?;
  Ok(Json(pair))
}

/// `POST /user/auth/policy`
pub async fn by_policy_number<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Json(body): extract::Json<PolicyLogin>,
) -> Result<Json<TokenPair>, ApiError> {
  let pair = state
    .auth
    .auth_by_policy_number(&body.policy_number, &body.password)
    .await?;
  Ok(Json(pair))
}

/// `POST /user/auth/refresh`
pub async fn refresh<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Json(body): extract::Json<RefreshBody>,
) -> Result<Json<TokenPair>, ApiError> {
  let pair = state.auth.refresh(&body.refresh_token).await?;
  Ok(Json(pair))
}

/// `POST /user/sign_up`
pub async fn sign_up<S: HospitalStore>(
  State(state): State<AppState<S>>,
  extract::Json(body): extract::Json<Registration>,
) -> Result<impl IntoResponse, ApiError> {
  let pair = state.auth.register(body).await?;
  Ok((StatusCode::CREATED, Json(pair)))
}
