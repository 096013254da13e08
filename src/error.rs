//! Error types for the Function Compute client.
//!
//! Every call terminates in exactly one of three outcomes: a successful
//! response, a [`FcError::Client`] value, or a [`FcError::Server`] value.
//! Failures are ordinary tagged values returned through [`FcResult`]; the
//! client never panics on a failed call.
//!
//! # Error Hierarchy
//!
//! The main [`FcError`] enum contains variants for different error categories:
//! - Precondition errors raised before dispatch (configuration, credentials,
//!   request validation, signing, serialization)
//! - `Client` - the service answered with a status in [300, 500), or the
//!   request never reached the service at all
//! - `Server` - the service answered with a status >= 500 on every attempt
//!
//! # Examples
//!
//! ```rust
//! use integrations_alicloud_fc::error::FcError;
//!
//! fn handle_fc_error(error: &FcError) {
//!     if error.is_server_error() {
//!         println!("service-side failure, already retried");
//!     }
//!     if let Some(code) = error.error_code() {
//!         println!("FC error code: {}", code);
//!     }
//!     if let Some(request_id) = error.request_id() {
//!         println!("request id for support: {}", request_id);
//!     }
//! }
//! ```

use thiserror::Error;

/// Result alias used throughout the crate.
pub type FcResult<T> = Result<T, FcError>;

/// Error code used when the service could not be reached or answered with an
/// empty client-error body.
pub const ERR_SERVER_UNREACHABLE: &str = "SDK.ServerUnreachable";

/// Error code used when a client-error body could not be parsed.
pub const ERR_RESPONSE_NOT_PARSABLE: &str = "SDK.ResponseNotParsable";

/// Error code used when a client-error body parsed but carried no code.
pub const ERR_UNKNOWN: &str = "SDK.UnknownError";

/// Error code synthesized when a server-error body could not be parsed.
pub const ERR_INTERNAL_SERVICE: &str = "InternalServiceError";

/// Top-level error type for the Function Compute client.
///
/// Each variant provides specific context about the error and supports
/// inspection for its class, error code, request id, and HTTP status.
#[derive(Debug, Error)]
pub enum FcError {
    /// Configuration-related errors.
    ///
    /// These errors occur when the client is misconfigured or when
    /// configuration values are invalid or missing.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Credential-related errors.
    ///
    /// These errors occur when access keys are missing or blank. Raised
    /// before any request is dispatched.
    #[error("Credential error: {message}")]
    Credential {
        /// Description of the credential error.
        message: String,
    },

    /// Request validation errors.
    ///
    /// A malformed request (empty path, path not starting with `/`) fails
    /// the whole call immediately; no attempt is dispatched.
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the validation error.
        message: String,
        /// Optional field name that failed validation.
        field: Option<String>,
    },

    /// Request signing errors.
    ///
    /// These errors occur when the signature computation fails.
    #[error("Signing error: {message}")]
    Signing {
        /// Description of the signing error.
        message: String,
    },

    /// Serialization errors.
    ///
    /// These errors occur when serializing a request payload fails.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization error.
        message: String,
    },

    /// Client-class failures.
    ///
    /// The service answered with a status in [300, 500), or the request
    /// failed at the network level before any HTTP status was obtained
    /// (code [`ERR_SERVER_UNREACHABLE`], no status). Never retried.
    #[error("Client error: {code} - {message}")]
    Client {
        /// FC error code (e.g. "ServiceNotFound"), or one of the `SDK.*`
        /// fallback codes when no parsable body was available.
        code: String,
        /// Human-readable error message.
        message: String,
        /// Request id from the `x-fc-request-id` response header.
        request_id: Option<String>,
        /// Final HTTP status, absent for network-level failures.
        status_code: Option<u16>,
    },

    /// Server-class failures.
    ///
    /// The service answered with a status >= 500 on the final attempt after
    /// the retry budget was exhausted.
    #[error("Server error: {code} - {message}")]
    Server {
        /// FC error code, or [`ERR_INTERNAL_SERVICE`] when the body was not
        /// a parsable error payload.
        code: String,
        /// Human-readable error message.
        message: String,
        /// Request id from the `x-fc-request-id` response header.
        request_id: Option<String>,
        /// Final HTTP status (always >= 500).
        status_code: u16,
    },
}

impl FcError {
    /// Returns true for [`FcError::Client`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_alicloud_fc::error::FcError;
    ///
    /// let error = FcError::Client {
    ///     code: "ServiceNotFound".to_string(),
    ///     message: "service does not exist".to_string(),
    ///     request_id: None,
    ///     status_code: Some(404),
    /// };
    /// assert!(error.is_client_error());
    /// assert!(!error.is_server_error());
    /// ```
    pub fn is_client_error(&self) -> bool {
        matches!(self, FcError::Client { .. })
    }

    /// Returns true for [`FcError::Server`].
    pub fn is_server_error(&self) -> bool {
        matches!(self, FcError::Server { .. })
    }

    /// Returns the FC error code if this is a classified failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_alicloud_fc::error::FcError;
    ///
    /// let error = FcError::Server {
    ///     code: "InternalServerError".to_string(),
    ///     message: "something broke".to_string(),
    ///     request_id: Some("abc-123".to_string()),
    ///     status_code: 500,
    /// };
    /// assert_eq!(error.error_code(), Some("InternalServerError"));
    /// ```
    pub fn error_code(&self) -> Option<&str> {
        match self {
            FcError::Client { code, .. } | FcError::Server { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// Returns the service request id if available.
    ///
    /// The request id can be used for debugging and support tickets.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            FcError::Client { request_id, .. } | FcError::Server { request_id, .. } => {
                request_id.as_deref()
            }
            _ => None,
        }
    }

    /// Returns the final HTTP status if one was obtained.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FcError::Client { status_code, .. } => *status_code,
            FcError::Server { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Build the client-class failure used when the service could not be
    /// reached at the network level.
    pub(crate) fn server_unreachable(message: impl Into<String>) -> Self {
        FcError::Client {
            code: ERR_SERVER_UNREACHABLE.to_string(),
            message: message.into(),
            request_id: None,
            status_code: None,
        }
    }
}

// From implementations for common error types

impl From<std::io::Error> for FcError {
    fn from(err: std::io::Error) -> Self {
        FcError::server_unreachable(err.to_string())
    }
}

impl From<serde_json::Error> for FcError {
    fn from(err: serde_json::Error) -> Self {
        FcError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for FcError {
    // Network-level failures (timeouts included) terminate the call without
    // retry and carry the fixed SDK.ServerUnreachable code.
    fn from(err: reqwest::Error) -> Self {
        FcError::server_unreachable(err.to_string())
    }
}

impl From<crate::config::ConfigError> for FcError {
    fn from(err: crate::config::ConfigError) -> Self {
        FcError::Configuration {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::signing::SigningError> for FcError {
    fn from(err: crate::signing::SigningError) -> Self {
        match err {
            crate::signing::SigningError::MissingCredential { field } => FcError::Credential {
                message: format!("credential field is blank: {}", field),
            },
            other => FcError::Signing {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_class_accessors() {
        let client = FcError::Client {
            code: "ServiceNotFound".to_string(),
            message: "no such service".to_string(),
            request_id: Some("abc-123".to_string()),
            status_code: Some(404),
        };
        assert!(client.is_client_error());
        assert!(!client.is_server_error());
        assert_eq!(client.error_code(), Some("ServiceNotFound"));
        assert_eq!(client.request_id(), Some("abc-123"));
        assert_eq!(client.status_code(), Some(404));

        let server = FcError::Server {
            code: ERR_INTERNAL_SERVICE.to_string(),
            message: "upstream failure".to_string(),
            request_id: None,
            status_code: 503,
        };
        assert!(server.is_server_error());
        assert!(!server.is_client_error());
        assert_eq!(server.error_code(), Some(ERR_INTERNAL_SERVICE));
        assert_eq!(server.request_id(), None);
        assert_eq!(server.status_code(), Some(503));
    }

    #[test]
    fn test_precondition_errors_carry_no_classification() {
        let validation = FcError::Validation {
            message: "path must start with /".to_string(),
            field: Some("path".to_string()),
        };
        assert!(!validation.is_client_error());
        assert!(!validation.is_server_error());
        assert_eq!(validation.error_code(), None);
        assert_eq!(validation.request_id(), None);
        assert_eq!(validation.status_code(), None);
    }

    #[test]
    fn test_from_io_error_maps_to_server_unreachable() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err: FcError = io_err.into();

        assert!(err.is_client_error());
        assert_eq!(err.error_code(), Some(ERR_SERVER_UNREACHABLE));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: FcError = json_err.into();
        assert!(matches!(err, FcError::Serialization { .. }));
    }

    #[test]
    fn test_from_signing_error() {
        let err: FcError = crate::signing::SigningError::MissingCredential {
            field: "access_key_id".to_string(),
        }
        .into();
        assert!(matches!(err, FcError::Credential { .. }));

        let err: FcError = crate::signing::SigningError::SigningFailed {
            message: "bad key".to_string(),
        }
        .into();
        assert!(matches!(err, FcError::Signing { .. }));
    }

    #[test]
    fn test_error_display() {
        let error = FcError::Client {
            code: ERR_RESPONSE_NOT_PARSABLE.to_string(),
            message: "Failed to parse response content".to_string(),
            request_id: None,
            status_code: Some(404),
        };
        assert_eq!(
            error.to_string(),
            "Client error: SDK.ResponseNotParsable - Failed to parse response content"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FcError>();
    }
}
