//! HTTP handlers for the dashboard API.

pub mod generate;
pub mod navigation;
pub mod screens;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use opsnexus_core::view::UnknownView;
use opsnexus_core::{Action, InputError};
use thiserror::Error;

/// Request-level failures. Generation failures are not here: they are answered with fallback text.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    UnknownView(#[from] UnknownView),

    #[error("{0} generation already in progress")]
    Busy(Action),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Input(_) | ApiError::UnknownView(_) => StatusCode::BAD_REQUEST,
            ApiError::Busy(_) => StatusCode::CONFLICT,
        };
        tracing::debug!(%status, "request rejected: {}", self);
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
