//! Configuration module for the Function Compute client.
//!
//! This module provides configuration types and builders for creating and
//! customizing the client behavior, including:
//!
//! - Region, account, and endpoint configuration
//! - Credential provider configuration
//! - Timeout and attempt-budget settings
//! - User agent customization

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub mod error;

pub use error::ConfigError;

use crate::credentials::{
    CredentialProvider, EnvironmentCredentialProvider, FcCredentials, StaticCredentialProvider,
};

/// Default total attempt budget for a single call (first attempt included).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default whole-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Function Compute client.
#[derive(Clone)]
pub struct FcConfig {
    /// Alibaba Cloud region (e.g. "cn-hangzhou"). Used to derive the
    /// endpoint when no custom endpoint is set.
    pub region: Option<String>,

    /// Custom endpoint URL (for private deployments or tests).
    pub endpoint: Option<String>,

    /// Account id, sent in the `x-fc-account-id` header and used in the
    /// derived endpoint host.
    pub account_id: String,

    /// Credential provider for request signing.
    pub credentials_provider: Arc<dyn CredentialProvider + Send + Sync>,

    /// Timeout for the entire request.
    pub timeout: Duration,

    /// Timeout for establishing connections.
    pub connect_timeout: Duration,

    /// Total attempt budget per call, first attempt included. Always >= 1.
    pub max_attempts: u32,

    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl FcConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_alicloud_fc::config::FcConfig;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = FcConfig::builder()
    ///     .region("cn-hangzhou")
    ///     .account_id("1234567890")
    ///     .credentials("access_key", "secret_key")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> FcConfigBuilder {
        FcConfigBuilder::default()
    }

    /// Create a configuration from environment variables.
    ///
    /// This method reads the following environment variables:
    /// - `FC_ACCOUNT_ID` for the account id (required)
    /// - `FC_ENDPOINT` for a custom endpoint, or `FC_REGION` for the region
    ///   (one of the two is required)
    /// - The `ALIBABA_CLOUD_*` variables for credentials
    ///
    /// # Example
    ///
    /// ```no_run
    /// use integrations_alicloud_fc::config::FcConfig;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = FcConfig::from_env()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        let account_id = std::env::var("FC_ACCOUNT_ID").map_err(|_| ConfigError::Environment {
            message: "FC_ACCOUNT_ID must be set".to_string(),
        })?;

        let mut builder = Self::builder()
            .account_id(account_id)
            .credentials_provider(EnvironmentCredentialProvider::new());

        if let Ok(endpoint) = std::env::var("FC_ENDPOINT") {
            builder = builder.endpoint(endpoint);
        } else if let Ok(region) = std::env::var("FC_REGION") {
            builder = builder.region(region);
        } else {
            return Err(ConfigError::Environment {
                message: "FC_ENDPOINT or FC_REGION must be set".to_string(),
            });
        }

        builder.build()
    }

    /// Get the FC endpoint URL for this configuration.
    ///
    /// Returns the custom endpoint if configured, otherwise constructs the
    /// standard account-scoped endpoint for the configured region.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_alicloud_fc::config::FcConfig;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = FcConfig::builder()
    ///     .region("cn-hangzhou")
    ///     .account_id("1234567890")
    ///     .credentials("access_key", "secret_key")
    ///     .build()?;
    ///
    /// assert_eq!(
    ///     config.fc_endpoint(),
    ///     "https://1234567890.cn-hangzhou.fc.aliyuncs.com"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn fc_endpoint(&self) -> String {
        match (&self.endpoint, &self.region) {
            (Some(endpoint), _) => endpoint.trim_end_matches('/').to_string(),
            (None, Some(region)) => {
                format!("https://{}.{}.fc.aliyuncs.com", self.account_id, region)
            }
            // Unreachable after build(), which requires one of the two.
            (None, None) => String::new(),
        }
    }
}

impl fmt::Debug for FcConfig {
    // The credential provider may hold key material; keep it out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FcConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("account_id", &self.account_id)
            .field("credentials_provider", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_attempts", &self.max_attempts)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for creating client configurations.
#[derive(Default)]
pub struct FcConfigBuilder {
    region: Option<String>,
    endpoint: Option<String>,
    account_id: Option<String>,
    credentials_provider: Option<Arc<dyn CredentialProvider + Send + Sync>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    max_attempts: Option<u32>,
    user_agent: Option<String>,
}

impl FcConfigBuilder {
    /// Set the Alibaba Cloud region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint URL.
    ///
    /// This is useful for tests or private FC deployments. A trailing slash
    /// is stripped when the endpoint is resolved.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the account id.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Set a custom credential provider.
    pub fn credentials_provider(
        mut self,
        provider: impl CredentialProvider + Send + Sync + 'static,
    ) -> Self {
        self.credentials_provider = Some(Arc::new(provider));
        self
    }

    /// Set static credentials (convenience method).
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_alicloud_fc::config::FcConfig;
    ///
    /// let builder = FcConfig::builder()
    ///     .region("cn-hangzhou")
    ///     .account_id("1234567890")
    ///     .credentials("LTAI4ExampleAccessKey", "example-secret");
    /// ```
    pub fn credentials(self, access_key_id: &str, access_key_secret: &str) -> Self {
        self.credentials_provider(StaticCredentialProvider::new(
            access_key_id.to_string(),
            access_key_secret.to_string(),
        ))
    }

    /// Set static credentials with an STS security token (convenience
    /// method).
    pub fn credentials_with_token(
        self,
        access_key_id: &str,
        access_key_secret: &str,
        security_token: &str,
    ) -> Self {
        self.credentials_provider(StaticCredentialProvider::from_credentials(
            FcCredentials::new(access_key_id, access_key_secret)
                .with_security_token(security_token),
        ))
    }

    /// Set the whole-request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set the total attempt budget per call, first attempt included.
    ///
    /// A value of 0 is normalized to 1 at build time; a call always makes at
    /// least one attempt.
    ///
    /// # Example
    ///
    /// ```
    /// use integrations_alicloud_fc::config::FcConfig;
    ///
    /// let builder = FcConfig::builder()
    ///     .region("cn-hangzhou")
    ///     .account_id("1234567890")
    ///     .max_attempts(5);
    /// ```
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Set a custom user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the account id or credentials
    /// provider is not set, or if neither an endpoint nor a region is set.
    pub fn build(self) -> Result<FcConfig, ConfigError> {
        let account_id = self.account_id.ok_or_else(|| ConfigError::MissingField {
            field: "account_id".to_string(),
        })?;

        let credentials_provider =
            self.credentials_provider
                .ok_or_else(|| ConfigError::MissingField {
                    field: "credentials_provider".to_string(),
                })?;

        if self.endpoint.is_none() && self.region.is_none() {
            return Err(ConfigError::MissingField {
                field: "endpoint or region".to_string(),
            });
        }

        Ok(FcConfig {
            region: self.region,
            endpoint: self.endpoint,
            account_id,
            credentials_provider,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS).max(1),
            user_agent: self.user_agent,
        })
    }
}
