//! Error types for FC request signing.

use thiserror::Error;

/// Errors that can occur while signing an FC request.
#[derive(Debug, Error)]
pub enum SigningError {
    /// A credential field required for signing was blank.
    ///
    /// Signing never proceeds with an empty access key id or secret; this is
    /// a configuration fault, not a retryable condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use integrations_alicloud_fc::signing::SigningError;
    ///
    /// let error = SigningError::MissingCredential {
    ///     field: "access_key_id".to_string(),
    /// };
    /// assert_eq!(error.to_string(), "Missing credential field: access_key_id");
    /// ```
    #[error("Missing credential field: {field}")]
    MissingCredential {
        /// The name of the blank credential field.
        field: String,
    },

    /// A computed header value was not valid HTTP header text.
    #[error("Invalid value for header: {name}")]
    InvalidHeaderValue {
        /// The name of the header being set.
        name: String,
    },

    /// The signature computation itself failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use integrations_alicloud_fc::signing::SigningError;
    ///
    /// let error = SigningError::SigningFailed {
    ///     message: "Unable to calculate signature".to_string(),
    /// };
    /// assert_eq!(error.to_string(), "Signing failed: Unable to calculate signature");
    /// ```
    #[error("Signing failed: {message}")]
    SigningFailed {
        /// Details about the signing failure.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_error() {
        let error = SigningError::MissingCredential {
            field: "access_key_secret".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing credential field: access_key_secret"
        );
    }

    #[test]
    fn test_invalid_header_value_error() {
        let error = SigningError::InvalidHeaderValue {
            name: "authorization".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid value for header: authorization");
    }

    #[test]
    fn test_signing_failed_error() {
        let error = SigningError::SigningFailed {
            message: "HMAC calculation failed".to_string(),
        };
        assert_eq!(error.to_string(), "Signing failed: HMAC calculation failed");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SigningError>();
    }
}
