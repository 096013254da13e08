//! Static credentials provider.

use super::{CredentialProvider, FcCredentials};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;

/// Credentials provider that returns fixed credentials supplied by the
/// caller.
///
/// Blank keys are rejected at retrieval time so a misconfigured client fails
/// before any request is signed.
///
/// # Example
///
/// ```no_run
/// use integrations_alicloud_fc::credentials::{
///     CredentialProvider, StaticCredentialProvider,
/// };
///
/// # async {
/// let provider = StaticCredentialProvider::new("LTAI4ExampleAccessKey", "example-secret");
/// let credentials = provider.credentials().await?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # };
/// ```
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: FcCredentials,
}

impl StaticCredentialProvider {
    /// Create a provider from an access key pair.
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            credentials: FcCredentials::new(access_key_id, access_key_secret),
        }
    }

    /// Create a provider from complete credentials, token included.
    pub fn from_credentials(credentials: FcCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn credentials(&self) -> Result<FcCredentials, CredentialError> {
        if self.credentials.access_key_id().is_empty() {
            return Err(CredentialError::Invalid {
                message: "access key id is empty".to_string(),
            });
        }
        if self.credentials.access_key_secret().is_empty() {
            return Err(CredentialError::Invalid {
                message: "access key secret is empty".to_string(),
            });
        }
        Ok(self.credentials.clone())
    }
}
