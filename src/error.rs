// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! `AppError` covers everything that can go wrong talking to Notion, the
//! filesystem, or the artifact store; `FetchError` describes how a block-tree
//! traversal failed as a whole.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound | Self::HttpStatus(404))
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionApi {
        code: NotionErrorCode,
        message: String,
        status: u16,
        request_id: Option<String>,
    },

    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Operation timed out after {limit:?}: {operation}")]
    Timeout {
        operation: String,
        limit: std::time::Duration,
    },

    #[error("Nothing to export: {0}")]
    NothingToExport(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse {
            url: String::new(),
            reason: err.to_string(),
        }
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

/// How a block-tree traversal failed.
///
/// Only the root call is fatal by default. Failures below the root are
/// absorbed into the result's branch report unless the traversal runs in
/// strict mode, in which case the first one surfaces as `Branch`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to retrieve children of root {root_id}: {source}")]
    Root {
        root_id: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Failed to retrieve children of block {block_id} at depth {depth}: {source}")]
    Branch {
        block_id: String,
        depth: usize,
        #[source]
        source: Box<AppError>,
    },
}

impl FetchError {
    /// The id whose children could not be retrieved.
    pub fn failed_id(&self) -> &str {
        match self {
            Self::Root { root_id, .. } => root_id,
            Self::Branch { block_id, .. } => block_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in [
            "rate_limited",
            "object_not_found",
            "unauthorized",
            "restricted_resource",
            "validation_error",
            "service_unavailable",
        ] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new_code"),
            NotionErrorCode::Unknown("brand_new_code".to_string())
        );
    }

    #[test]
    fn not_found_covers_http_fallback() {
        assert!(NotionErrorCode::ObjectNotFound.is_not_found());
        assert!(NotionErrorCode::from_http_status(404).is_not_found());
        assert!(!NotionErrorCode::RateLimited.is_not_found());
    }

    #[test]
    fn root_fetch_error_names_the_root() {
        let err = FetchError::Root {
            root_id: "P1".to_string(),
            source: Box::new(AppError::Persistence("boom".to_string())),
        };
        assert_eq!(err.failed_id(), "P1");
        assert!(err.to_string().contains("root P1"));
        assert!(err.to_string().contains("boom"));
    }
}
