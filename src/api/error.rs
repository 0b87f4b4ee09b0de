//! API error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::error::RosterError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::Unauthorized(msg) | ApiError::Internal(msg) => {
                msg
            }
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Workbook(_)
            | RosterError::Import(_)
            | RosterError::UnsupportedFile(_)
            | RosterError::Validation(_)
            | RosterError::Json(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref msg) = self {
            error!(error = %msg, "request failed");
        }
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (status, body).into_response()
    }
}
