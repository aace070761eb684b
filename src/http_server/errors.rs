//! HTTP API errors and their response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the record endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request carries no Content-Schema header
    #[error("missing Content-Schema header")]
    MissingSchema,

    /// The supplied schema description does not parse
    #[error("invalid schema description: {0}")]
    SchemaParse(String),

    /// The supplied schema is structurally different from the reference
    #[error("supplied schema is not compatible with the reference schema")]
    IncompatibleSchema,

    /// The payload is not structurally valid CSV
    #[error("payload is not valid CSV: {0}")]
    Decode(String),

    /// The payload failed field validation; carries the aggregated report
    #[error("payload failed schema validation:\n{0}")]
    Validation(String),

    /// A write carried no usable record
    #[error("request contains no record")]
    EmptyPayload,

    /// A query key does not name a schema column
    #[error("unknown key column: {0}")]
    UnknownColumn(String),

    /// Update/delete without any key query parameter
    #[error("at least one key query parameter is required")]
    MissingKeys,

    /// Unexpected server-side failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps an engine error raised while parsing a supplied schema.
    pub fn from_parse(err: SchemaError) -> Self {
        ApiError::SchemaParse(err.to_string())
    }

    /// Maps an engine error raised while validating a payload, keeping the
    /// decode/validation distinction.
    pub fn from_validation(err: SchemaError) -> Self {
        match err {
            SchemaError::Decode(e) => ApiError::Decode(e.to_string()),
            SchemaError::Validation(report) => ApiError::Validation(report.to_string()),
            SchemaError::NoColumns => ApiError::SchemaParse(err.to_string()),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingSchema
            | ApiError::SchemaParse(_)
            | ApiError::Decode(_)
            | ApiError::EmptyPayload
            | ApiError::UnknownColumn(_)
            | ApiError::MissingKeys => StatusCode::BAD_REQUEST,

            ApiError::IncompatibleSchema => StatusCode::CONFLICT,

            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
