//! Environment variable credentials provider.

use super::{CredentialProvider, FcCredentials};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use std::env;

/// Environment variable holding the access key id.
pub const ALIBABA_CLOUD_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
/// Environment variable holding the access key secret.
pub const ALIBABA_CLOUD_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
/// Environment variable holding the optional STS security token.
pub const ALIBABA_CLOUD_SECURITY_TOKEN: &str = "ALIBABA_CLOUD_SECURITY_TOKEN";

/// Credentials provider that reads from environment variables.
///
/// This provider looks for the following environment variables:
/// - `ALIBABA_CLOUD_ACCESS_KEY_ID`: The access key id (required)
/// - `ALIBABA_CLOUD_ACCESS_KEY_SECRET`: The access key secret (required)
/// - `ALIBABA_CLOUD_SECURITY_TOKEN`: Optional STS token for temporary credentials
///
/// # Example
///
/// ```no_run
/// use integrations_alicloud_fc::credentials::{
///     CredentialProvider, EnvironmentCredentialProvider,
/// };
///
/// # async {
/// let provider = EnvironmentCredentialProvider::new();
/// let credentials = provider.credentials().await?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # };
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCredentialProvider;

impl EnvironmentCredentialProvider {
    /// Create a new environment credentials provider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialProvider for EnvironmentCredentialProvider {
    async fn credentials(&self) -> Result<FcCredentials, CredentialError> {
        let access_key_id =
            env::var(ALIBABA_CLOUD_ACCESS_KEY_ID).map_err(|_| CredentialError::Missing {
                message: format!(
                    "{} environment variable not set",
                    ALIBABA_CLOUD_ACCESS_KEY_ID
                ),
            })?;

        if access_key_id.is_empty() {
            return Err(CredentialError::Invalid {
                message: format!("{} is empty", ALIBABA_CLOUD_ACCESS_KEY_ID),
            });
        }

        let access_key_secret =
            env::var(ALIBABA_CLOUD_ACCESS_KEY_SECRET).map_err(|_| CredentialError::Missing {
                message: format!(
                    "{} environment variable not set",
                    ALIBABA_CLOUD_ACCESS_KEY_SECRET
                ),
            })?;

        if access_key_secret.is_empty() {
            return Err(CredentialError::Invalid {
                message: format!("{} is empty", ALIBABA_CLOUD_ACCESS_KEY_SECRET),
            });
        }

        // Security token is optional
        let security_token = env::var(ALIBABA_CLOUD_SECURITY_TOKEN)
            .ok()
            .filter(|s| !s.is_empty());

        let credentials = FcCredentials::new(access_key_id, access_key_secret);

        let credentials = if let Some(token) = security_token {
            credentials.with_security_token(token)
        } else {
            credentials
        };

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    // Process-wide environment is shared; serialize tests that touch it.
    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn with_env_vars<F, R>(set: &[(&str, &str)], clear: &[&str], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = env_lock().lock().unwrap();

        let touched: Vec<&str> = set.iter().map(|(k, _)| *k).chain(clear.iter().copied()).collect();
        let originals: Vec<_> = touched.iter().map(|k| (*k, env::var(*k).ok())).collect();

        for (key, value) in set {
            env::set_var(key, value);
        }
        for key in clear {
            env::remove_var(key);
        }

        let result = f();

        for (key, original) in originals {
            match original {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        result
    }

    #[test]
    fn test_env_provider_success() {
        let result = with_env_vars(
            &[
                (ALIBABA_CLOUD_ACCESS_KEY_ID, "LTAI4ExampleAccessKey"),
                (ALIBABA_CLOUD_ACCESS_KEY_SECRET, "example-secret"),
            ],
            &[ALIBABA_CLOUD_SECURITY_TOKEN],
            || {
                let provider = EnvironmentCredentialProvider::new();
                futures::executor::block_on(provider.credentials())
            },
        );

        let creds = result.unwrap();
        assert_eq!(creds.access_key_id(), "LTAI4ExampleAccessKey");
        assert_eq!(creds.access_key_secret(), "example-secret");
        assert!(creds.security_token().is_none());
    }

    #[test]
    fn test_env_provider_with_security_token() {
        let result = with_env_vars(
            &[
                (ALIBABA_CLOUD_ACCESS_KEY_ID, "AKID"),
                (ALIBABA_CLOUD_ACCESS_KEY_SECRET, "SECRET"),
                (ALIBABA_CLOUD_SECURITY_TOKEN, "TOKEN"),
            ],
            &[],
            || {
                let provider = EnvironmentCredentialProvider::new();
                futures::executor::block_on(provider.credentials())
            },
        );

        let creds = result.unwrap();
        assert_eq!(creds.security_token(), Some("TOKEN"));
    }

    #[test]
    fn test_env_provider_missing_access_key() {
        let result = with_env_vars(
            &[],
            &[ALIBABA_CLOUD_ACCESS_KEY_ID, ALIBABA_CLOUD_ACCESS_KEY_SECRET],
            || {
                let provider = EnvironmentCredentialProvider::new();
                futures::executor::block_on(provider.credentials())
            },
        );
        assert!(matches!(result, Err(CredentialError::Missing { .. })));
    }

    #[test]
    fn test_env_provider_missing_secret_key() {
        let result = with_env_vars(
            &[(ALIBABA_CLOUD_ACCESS_KEY_ID, "AKID")],
            &[ALIBABA_CLOUD_ACCESS_KEY_SECRET],
            || {
                let provider = EnvironmentCredentialProvider::new();
                futures::executor::block_on(provider.credentials())
            },
        );
        assert!(matches!(result, Err(CredentialError::Missing { .. })));
    }

    #[test]
    fn test_env_provider_empty_access_key() {
        let result = with_env_vars(
            &[
                (ALIBABA_CLOUD_ACCESS_KEY_ID, ""),
                (ALIBABA_CLOUD_ACCESS_KEY_SECRET, "SECRET"),
            ],
            &[],
            || {
                let provider = EnvironmentCredentialProvider::new();
                futures::executor::block_on(provider.credentials())
            },
        );
        assert!(matches!(result, Err(CredentialError::Invalid { .. })));
    }

    #[test]
    fn test_env_provider_empty_secret_key() {
        let result = with_env_vars(
            &[
                (ALIBABA_CLOUD_ACCESS_KEY_ID, "AKID"),
                (ALIBABA_CLOUD_ACCESS_KEY_SECRET, ""),
            ],
            &[],
            || {
                let provider = EnvironmentCredentialProvider::new();
                futures::executor::block_on(provider.credentials())
            },
        );
        assert!(matches!(result, Err(CredentialError::Invalid { .. })));
    }
}
