//! Extractors whose rejections use the API's `{"error": …}` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::ApiError;

/// `axum::Json`, rejecting malformed bodies as [`ApiError::BadRequest`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

/// `axum::extract::Path`, rejecting unparsable segments as
/// [`ApiError::BadRequest`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);
