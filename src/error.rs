//! HTTP-facing error type and its wire representation.
//!
//! Every failure leaving a handler is an [`AppError`]; it is the single place
//! where classified shortening errors are translated into status codes.
//!
//! | Error                                   | Status |
//! |-----------------------------------------|--------|
//! | validation (bad JSON, URL, provider)    | 422    |
//! | [`ShortenerError::Timeout`]             | 504    |
//! | [`ShortenerError::Request`]             | 502    |
//! | [`ShortenerError::InvalidResponse`]     | 502    |
//! | [`ShortenerError::Generic`] / other     | 500    |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::ShortenerError;

const VALIDATION_DESCRIPTION: &str = "Received request with invalid data";
const BAD_GATEWAY_DESCRIPTION: &str =
    "The proxy server received an invalid response from an upstream server.";
const GATEWAY_TIMEOUT_DESCRIPTION: &str = "The connection to an upstream server timed out.";
const INTERNAL_DESCRIPTION: &str = "The server encountered an internal error and was unable to complete your request.";

/// JSON error body: `{"name", "description", "errors"?}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: &'static str,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Validation { errors: Vec<FieldError> },
    GatewayTimeout { message: String },
    BadGateway { message: String },
    Internal { message: String, expose: bool },
}

impl AppError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    /// Internal error; `message` is only put on the wire when `expose` is true.
    pub fn internal(message: impl Into<String>, expose: bool) -> Self {
        Self::Internal {
            message: message.into(),
            expose,
        }
    }

    /// Maps a classified shortening failure to its HTTP error.
    ///
    /// `expose_details` controls whether unclassified failures carry their
    /// description (debug mode).
    pub fn from_shortener_error(err: ShortenerError, expose_details: bool) -> Self {
        match err {
            ShortenerError::Timeout(_) => Self::GatewayTimeout {
                message: err.to_string(),
            },
            ShortenerError::Request(_) | ShortenerError::InvalidResponse(_) => Self::BadGateway {
                message: err.to_string(),
            },
            ShortenerError::Generic(_) => Self::internal(format!("{err:?}"), expose_details),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::GatewayTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ShortenerError> for AppError {
    fn from(err: ShortenerError) -> Self {
        Self::from_shortener_error(err, false)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut items: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{}'", field));
                    FieldError::new(field.to_string(), e.code.to_string(), message)
                })
            })
            .collect();
        items.sort_by(|a, b| a.field.cmp(&b.field));

        Self::validation(items)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(vec![FieldError::new(
            "body",
            "invalid_json",
            rejection.body_text(),
        )])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Validation { errors } => ErrorBody {
                name: "ValidationError",
                description: VALIDATION_DESCRIPTION.to_string(),
                errors: Some(errors),
            },
            AppError::GatewayTimeout { message } => {
                tracing::warn!(error = %message, "Responding with gateway timeout");
                ErrorBody {
                    name: "Gateway Timeout",
                    description: GATEWAY_TIMEOUT_DESCRIPTION.to_string(),
                    errors: None,
                }
            }
            AppError::BadGateway { message } => {
                tracing::warn!(error = %message, "Responding with bad gateway");
                ErrorBody {
                    name: "Bad Gateway",
                    description: BAD_GATEWAY_DESCRIPTION.to_string(),
                    errors: None,
                }
            }
            AppError::Internal { message, expose } => {
                tracing::error!(error = %message, "Unhandled error");
                ErrorBody {
                    name: "Internal Server Error",
                    description: if expose {
                        message
                    } else {
                        INTERNAL_DESCRIPTION.to_string()
                    },
                    errors: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
