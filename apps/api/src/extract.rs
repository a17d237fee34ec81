//! Request extractors whose rejections render as [`ApiError`] envelopes.
//!
//! ```rust,ignore
//! async fn update_pet(
//!     PathParam(id): PathParam<PetId>,
//!     JsonBody(request): JsonBody<PetRequest>,
//! ) -> Result<..., ApiError>
//! ```

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// `axum::Json` with a malformed-request envelope on rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with a malformed-request envelope on rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);
