use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::errors::{TrackerError, ValidationError};
use crate::types::ValidationField;

/// http-facing wrapper around tracker errors
#[derive(Debug)]
pub enum ApiError {
    Tracker(TrackerError),
    /// request body is not json of the expected shape
    InvalidBody(String),
    /// shared tracker state unavailable (poisoned lock or lost worker)
    Unavailable,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<ValidationField>,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Tracker(err) => match err {
                TrackerError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
                TrackerError::PeriodTooShort { .. } => (StatusCode::BAD_REQUEST, "period_too_short"),
                TrackerError::InvertedRange { .. } => (StatusCode::BAD_REQUEST, "inverted_range"),
                TrackerError::InvestmentNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                TrackerError::DuplicateInvestment { .. } => (StatusCode::CONFLICT, "duplicate"),
                TrackerError::CalculationError { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "calculation"),
                TrackerError::InvalidConfiguration { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "configuration"),
                TrackerError::Persistence { .. } | TrackerError::Io(_) | TrackerError::Serialization(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "persistence")
                }
                TrackerError::Export { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "export"),
            },
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "invalid_body"),
            ApiError::Unavailable => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        ApiError::Tracker(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Tracker(TrackerError::Validation(err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let (message, field) = match &self {
            ApiError::Tracker(TrackerError::Validation(v)) => (v.to_string(), Some(v.field())),
            ApiError::Tracker(err) => (err.to_string(), None),
            ApiError::InvalidBody(message) => (message.clone(), None),
            ApiError::Unavailable => ("tracker state unavailable".to_string(), None),
        };

        if status.is_server_error() {
            error!(status = %status, error = %message, "request failed");
        }

        (status, Json(ErrorBody { error: message, kind, field })).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
