//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration field was not provided.
    #[error("Missing required configuration field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// A configuration value was invalid.
    #[error("Invalid configuration value: {message}")]
    InvalidValue {
        /// Details about the invalid value.
        message: String,
    },

    /// A required environment variable was missing or unreadable.
    #[error("Environment error: {message}")]
    Environment {
        /// Details about the environment problem.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ConfigError::MissingField {
            field: "account_id".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing required configuration field: account_id"
        );

        let error = ConfigError::Environment {
            message: "FC_ACCOUNT_ID must be set".to_string(),
        };
        assert_eq!(error.to_string(), "Environment error: FC_ACCOUNT_ID must be set");
    }
}
