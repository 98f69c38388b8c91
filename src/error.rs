//! Application error type and HTTP response mapping.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Top-level JSON error body: `{"error": {...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application error with HTTP status mapping.
///
/// Every variant carries a human-readable message and a structured
/// `details` value included verbatim in the response body.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Forbidden { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, String, Value) {
        match self {
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, "validation_error", message, details)
            }
            AppError::Unauthorized { message, details } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", message, details)
            }
            AppError::Forbidden { message, details } => {
                (StatusCode::FORBIDDEN, "forbidden", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            AppError::Validation { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Internal { message, .. } => message,
        };
        write!(f, "{message}")
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();

        // RFC 6750: 401 responses carry a Bearer challenge.
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": db.constraint() }),
                );
            }
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let fields: Value = e
            .field_errors()
            .iter()
            .map(|(field, errors)| {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|err| {
                        err.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| err.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect::<serde_json::Map<String, Value>>()
            .into();

        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request("v", json!({})), StatusCode::BAD_REQUEST),
            (
                AppError::unauthorized("u", json!({})),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::forbidden("f", json!({})), StatusCode::FORBIDDEN),
            (AppError::not_found("n", json!({})), StatusCode::NOT_FOUND),
            (AppError::conflict("c", json!({})), StatusCode::CONFLICT),
            (
                AppError::internal("i", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_unauthorized_carries_bearer_challenge() {
        let response = AppError::unauthorized("no token", json!({})).into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_validation_errors_collect_field_details() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 7, max = 7, message = "must be exactly 7 characters"))]
            plate: String,
        }

        let probe = Probe {
            plate: "abc".to_string(),
        };
        let err: AppError = probe.validate().unwrap_err().into();

        match err {
            AppError::Validation { details, .. } => {
                assert!(
                    details["fields"]["plate"][0]
                        .as_str()
                        .unwrap()
                        .contains("7 characters")
                );
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
