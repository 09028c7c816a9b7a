use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::borrow::Cow;
use thiserror::Error as ThisError;
use vaxport_schema::{ErrorBody, MessageBody};

use super::VaxportError;

pub const ALREADY_VACCINATED: &str = "Student already vaccinated in this drive";

/// HTTP-facing error taxonomy.
///
/// Store failures only ever reach the client as the fixed, per-route `message`; the underlying
/// error is logged here and nowhere else.
#[derive(Debug, ThisError)]
pub enum ApiError {
    /// Malformed input. `400 {"error": ...}`.
    #[error("Invalid request: {0}")]
    Invalid(Cow<'static, str>),

    /// Write rejected by a uniqueness rule. `400 {"error": ...}`.
    #[error("Conflict: {0}")]
    Conflict(Cow<'static, str>),

    /// Duplicate (student, drive) link. `400 {"message": ...}`.
    #[error("Student already vaccinated in this drive")]
    AlreadyVaccinated,

    /// `404 {"error": ...}`.
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// `500` with a fixed message, as JSON or as plain text.
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        plain_text: bool,
        source: VaxportError,
    },
}

impl ApiError {
    pub fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        ApiError::Invalid(message.into())
    }

    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        ApiError::Conflict(message.into())
    }
}

/// Attaches a route's fixed 500 message to a store result.
pub trait OrInternal<T> {
    /// `500 {"error": message}` on failure.
    fn or_internal(self, message: &'static str) -> Result<T, ApiError>;

    /// `500 message` as `text/plain` on failure.
    fn or_internal_text(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> OrInternal<T> for Result<T, VaxportError> {
    fn or_internal(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::Internal {
            message,
            plain_text: false,
            source,
        })
    }

    fn or_internal_text(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::Internal {
            message,
            plain_text: true,
            source,
        })
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection, "Rejected request body");
        ApiError::invalid("Invalid request body")
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(rejection = %rejection, "Rejected path parameter");
        ApiError::invalid("Invalid id")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(rejection = %rejection, "Rejected query string");
        ApiError::invalid("Invalid query string")
    }
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                tracing::warn!(message = %message, "Request rejected");
                json_error(StatusCode::BAD_REQUEST, message)
            }
            ApiError::Conflict(message) => {
                tracing::warn!(message = %message, "Write rejected by uniqueness rule");
                json_error(StatusCode::BAD_REQUEST, message)
            }
            ApiError::AlreadyVaccinated => (
                StatusCode::BAD_REQUEST,
                Json(MessageBody {
                    message: ALREADY_VACCINATED.to_string(),
                }),
            )
                .into_response(),
            ApiError::NotFound(message) => json_error(StatusCode::NOT_FOUND, message),
            ApiError::Internal {
                message,
                plain_text,
                source,
            } => {
                tracing::error!(error = %source, "{message}");
                if plain_text {
                    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
                } else {
                    json_error(StatusCode::INTERNAL_SERVER_ERROR, message)
                }
            }
        }
    }
}
