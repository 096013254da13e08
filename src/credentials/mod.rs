//! Credential management for Function Compute.
//!
//! # Architecture
//!
//! - **Port**: `CredentialProvider` trait defines the interface for credential retrieval
//! - **Adapters**: implementations for different credential sources:
//!   - `StaticCredentialProvider`: Fixed credentials supplied by the caller
//!   - `EnvironmentCredentialProvider`: Load from environment variables
//!
//! # Example
//!
//! ```no_run
//! use integrations_alicloud_fc::credentials::{
//!     CredentialProvider, EnvironmentCredentialProvider,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = EnvironmentCredentialProvider::new();
//! let credentials = provider.credentials().await?;
//!
//! println!("Access Key: {}", credentials.access_key_id());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

pub mod env;
pub mod error;
pub mod static_creds;

pub use env::EnvironmentCredentialProvider;
pub use error::CredentialError;
pub use static_creds::StaticCredentialProvider;

/// Alibaba Cloud credentials: an access key pair plus an optional STS
/// security token.
///
/// # Security
///
/// - The access key secret is wrapped in `SecretString` and zeroized on drop
/// - The Debug implementation redacts the secret and the token
///
/// # Example
///
/// ```
/// use integrations_alicloud_fc::credentials::FcCredentials;
///
/// let credentials = FcCredentials::new("LTAI4ExampleAccessKey", "example-secret");
/// assert_eq!(credentials.access_key_id(), "LTAI4ExampleAccessKey");
/// ```
#[derive(Clone)]
pub struct FcCredentials {
    /// Access key id.
    access_key_id: String,

    /// Access key secret (protected).
    access_key_secret: SecretString,

    /// Optional STS security token for temporary credentials.
    security_token: Option<String>,
}

impl FcCredentials {
    /// Create credentials from an access key pair.
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: SecretString::new(access_key_secret.into()),
            security_token: None,
        }
    }

    /// Add an STS security token.
    ///
    /// The token is sent in the `x-fc-security-token` header and, because of
    /// the header prefix, participates in the request signature.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_alicloud_fc::credentials::FcCredentials;
    ///
    /// let credentials = FcCredentials::new("AKID", "SECRET")
    ///     .with_security_token("STS.token");
    /// assert_eq!(credentials.security_token(), Some("STS.token"));
    /// ```
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Get the access key id.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Get the access key secret.
    ///
    /// # Security
    ///
    /// This exposes the secret. Use with caution and ensure the value is not
    /// logged or persisted in plaintext.
    pub fn access_key_secret(&self) -> &str {
        self.access_key_secret.expose_secret()
    }

    /// Get the security token if present.
    pub fn security_token(&self) -> Option<&str> {
        self.security_token.as_deref()
    }
}

impl fmt::Debug for FcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FcCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"[REDACTED]")
            .field(
                "security_token",
                &self.security_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Trait for credential providers.
///
/// Implementations retrieve Alibaba Cloud credentials from a source such as
/// static configuration or environment variables.
///
/// # Example
///
/// ```no_run
/// use integrations_alicloud_fc::credentials::{
///     CredentialProvider, StaticCredentialProvider,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = StaticCredentialProvider::new("AKID", "SECRET");
/// let credentials = provider.credentials().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Retrieve credentials.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if credentials cannot be retrieved or are
    /// invalid.
    async fn credentials(&self) -> Result<FcCredentials, CredentialError>;
}
