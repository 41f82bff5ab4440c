//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of the CareSphere content service.
///
/// This enum covers domain, remote-provider, and infrastructure errors.
/// Remote-provider variants mirror what the upstream APIs can actually
/// return: a missing credential is caught before any network call, a 404
/// becomes [`CareError::NotFound`], and any other non-2xx becomes
/// [`CareError::Upstream`] carrying the status and raw body.
#[derive(Error, Debug)]
pub enum CareError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Remote Provider Errors ============
    /// Required external credential or setting missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-2xx, non-404 response from a remote provider
    #[error("Upstream error from {service}: HTTP {status} - {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Transport-level failure reaching a remote provider
    #[error("External service error: {service} - {message}")]
    ExternalService {
        service: &'static str,
        message: String,
    },

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Payload (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CareError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Upstream { .. } | Self::ExternalService { .. } => 502,
            Self::Configuration(_)
            | Self::Database(_)
            | Self::Serialization(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an upstream error from a provider's non-2xx response.
    #[must_use]
    pub fn upstream<T: Into<String>>(service: &'static str, status: u16, body: T) -> Self {
        Self::Upstream {
            service,
            status,
            body: body.into(),
        }
    }

    /// Creates an external service error for a transport failure.
    #[must_use]
    pub fn external_service<T: Into<String>>(service: &'static str, message: T) -> Self {
        Self::ExternalService {
            service,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CareError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // Unique constraint violation
                if let Some(code) = db_err.code() {
                    if code == "23505" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CareError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CareError`.
    #[must_use]
    pub fn from_error(error: &CareError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
            trace_id: None,
        }
    }

    /// Sets the trace ID.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&CareError> for ErrorResponse {
    fn from(error: &CareError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CareError::not_found("Verse", "GEN.1.1").status_code(), 404);
        assert_eq!(CareError::validation("invalid reference").status_code(), 400);
        assert_eq!(CareError::conflict("duplicate").status_code(), 409);
        assert_eq!(CareError::configuration("missing key").status_code(), 500);
        assert_eq!(CareError::upstream("bible-api", 503, "down").status_code(), 502);
        assert_eq!(
            CareError::external_service("messaging", "connect refused").status_code(),
            502
        );
        assert_eq!(CareError::Database("pool closed".to_string()).status_code(), 500);
        assert_eq!(CareError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CareError::not_found("Verse", "GEN.1.1").error_code(), "NOT_FOUND");
        assert_eq!(CareError::validation("bad input").error_code(), "VALIDATION_ERROR");
        assert_eq!(CareError::conflict("duplicate").error_code(), "CONFLICT");
        assert_eq!(
            CareError::configuration("missing key").error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(CareError::upstream("bible-api", 500, "body").error_code(), "UPSTREAM_ERROR");
        assert_eq!(
            CareError::external_service("messaging", "timeout").error_code(),
            "EXTERNAL_SERVICE_ERROR"
        );
        assert_eq!(CareError::Database("db".to_string()).error_code(), "DATABASE_ERROR");
        assert_eq!(
            CareError::Serialization("bad json".to_string()).error_code(),
            "SERIALIZATION_ERROR"
        );
        assert_eq!(CareError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_upstream_error_carries_status_and_body() {
        let err = CareError::upstream("bible-api", 429, "too many requests");
        let text = err.to_string();
        assert!(text.contains("429"));
        assert!(text.contains("too many requests"));
        assert!(text.contains("bible-api"));
    }

    #[test]
    fn test_error_constructors() {
        let not_found = CareError::not_found("Translation", "web");
        assert!(not_found.to_string().contains("Translation"));

        let validation = CareError::validation("invalid field");
        assert!(validation.to_string().contains("invalid field"));

        let configuration = CareError::configuration("BIBLE_API_KEY missing");
        assert!(configuration.to_string().contains("BIBLE_API_KEY"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let care: CareError = err.into();
        assert_eq!(care.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_error_response_from_error() {
        let err = CareError::not_found("Verse", "JHN.3.16");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
        assert!(response.trace_id.is_none());
    }

    #[test]
    fn test_error_response_with_trace_id() {
        let err = CareError::not_found("Verse", "JHN.3.16");
        let response = ErrorResponse::from_error(&err).with_trace_id("trace-123");
        assert_eq!(response.trace_id, Some("trace-123".to_string()));
    }

    #[test]
    fn test_error_response_with_details() {
        let err = CareError::validation("bad input");
        let details = vec![FieldError {
            field: "sender_email".to_string(),
            message: "Invalid email".to_string(),
            code: "INVALID_EMAIL".to_string(),
        }];
        let response = ErrorResponse::from_error(&err).with_details(details);
        assert!(response.details.is_some());
        assert_eq!(response.details.unwrap().len(), 1);
    }
}
