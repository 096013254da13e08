//! High-level Function Compute client.
//!
//! [`FcClient`] is the public face of the crate: it resolves configuration
//! and credentials, exposes the generic signed dispatch through
//! [`FcClient::send`], and provides the function-invocation operation the
//! service exists for.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{FcConfig, FcConfigBuilder};
use crate::credentials::CredentialProvider;
use crate::error::{FcError, FcResult};
use crate::http::{FcHttpClient, FcRequest, FcResponse, Transport};

/// FC API version segment used in every request path.
pub const API_VERSION: &str = "2016-08-15";

/// Header selecting synchronous or asynchronous invocation.
pub const INVOCATION_TYPE_HEADER: &str = "x-fc-invocation-type";

/// How a function invocation is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvocationType {
    /// Wait for the function to finish and return its output.
    #[default]
    Sync,
    /// Enqueue the invocation and return immediately.
    Async,
}

impl InvocationType {
    /// The header value for this invocation type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationType::Sync => "Sync",
            InvocationType::Async => "Async",
        }
    }
}

/// Client for the Alibaba Cloud Function Compute API.
///
/// # Example
///
/// ```rust,no_run
/// use integrations_alicloud_fc::FcClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FcClient::builder()
///         .region("cn-hangzhou")
///         .account_id("1234567890")
///         .credentials("LTAI4ExampleAccessKey", "example-secret")
///         .build()?;
///
///     let response = client
///         .invoke_function("demo-service", "echo", b"hello".to_vec())
///         .await?;
///     println!("{}", response.text());
///     Ok(())
/// }
/// ```
pub struct FcClient {
    inner: FcHttpClient,
}

impl FcClient {
    /// Create a client from an explicit configuration.
    pub fn new(config: FcConfig) -> FcResult<Self> {
        Ok(Self {
            inner: FcHttpClient::new(config)?,
        })
    }

    /// Create a client with a custom transport. Intended for tests.
    pub fn with_transport(config: FcConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: FcHttpClient::with_transport(config, transport),
        }
    }

    /// Create a new client builder.
    pub fn builder() -> FcClientBuilder {
        FcClientBuilder {
            config: FcConfig::builder(),
        }
    }

    /// Create a client from environment variables.
    ///
    /// Reads `FC_ACCOUNT_ID`, `FC_ENDPOINT` / `FC_REGION`, and the
    /// `ALIBABA_CLOUD_*` credential variables.
    pub fn from_env() -> FcResult<Self> {
        Self::new(FcConfig::from_env()?)
    }

    /// The resolved endpoint this client dispatches to.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }

    /// Dispatch an arbitrary signed request.
    ///
    /// Validates the request, then signs and sends it with the configured
    /// attempt budget: a status >= 500 is retried with a fresh signature, a
    /// status in [300, 500) and any network failure are terminal.
    pub async fn send(&self, request: &FcRequest) -> FcResult<FcResponse> {
        self.inner.send_with_retry(request).await
    }

    /// Invoke a function synchronously and return its output.
    pub async fn invoke_function(
        &self,
        service: &str,
        function: &str,
        payload: impl Into<Vec<u8>>,
    ) -> FcResult<FcResponse> {
        self.invoke_function_with(service, function, None, InvocationType::Sync, payload)
            .await
    }

    /// Invoke a function with an explicit qualifier and invocation type.
    ///
    /// The qualifier selects a service version or alias and becomes part of
    /// the request path:
    /// `/2016-08-15/services/{service}.{qualifier}/functions/{function}/invocations`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use integrations_alicloud_fc::{FcClient, InvocationType};
    ///
    /// # async fn example(client: &FcClient) -> Result<(), Box<dyn std::error::Error>> {
    /// let response = client
    ///     .invoke_function_with(
    ///         "demo-service",
    ///         "echo",
    ///         Some("LATEST"),
    ///         InvocationType::Async,
    ///         b"hello".to_vec(),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn invoke_function_with(
        &self,
        service: &str,
        function: &str,
        qualifier: Option<&str>,
        invocation_type: InvocationType,
        payload: impl Into<Vec<u8>>,
    ) -> FcResult<FcResponse> {
        let path = invocation_path(service, function, qualifier)?;
        let request = FcRequest::post(path)
            .header(INVOCATION_TYPE_HEADER, invocation_type.as_str())?
            .body(payload.into());
        self.send(&request).await
    }
}

/// Builder for creating a configured [`FcClient`].
pub struct FcClientBuilder {
    config: FcConfigBuilder,
}

impl FcClientBuilder {
    /// Set the Alibaba Cloud region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config = self.config.region(region);
        self
    }

    /// Set a custom endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config = self.config.endpoint(endpoint);
        self
    }

    /// Set the account id.
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.config = self.config.account_id(account_id);
        self
    }

    /// Set static credentials.
    pub fn credentials(mut self, access_key_id: &str, access_key_secret: &str) -> Self {
        self.config = self.config.credentials(access_key_id, access_key_secret);
        self
    }

    /// Set static credentials with an STS security token.
    pub fn credentials_with_token(
        mut self,
        access_key_id: &str,
        access_key_secret: &str,
        security_token: &str,
    ) -> Self {
        self.config =
            self.config
                .credentials_with_token(access_key_id, access_key_secret, security_token);
        self
    }

    /// Set a custom credential provider.
    pub fn credentials_provider(
        mut self,
        provider: impl CredentialProvider + Send + Sync + 'static,
    ) -> Self {
        self.config = self.config.credentials_provider(provider);
        self
    }

    /// Set the whole-request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config = self.config.timeout(duration);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.config = self.config.connect_timeout(duration);
        self
    }

    /// Set the total attempt budget per call, first attempt included.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config = self.config.max_attempts(attempts);
        self
    }

    /// Set a custom user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config = self.config.user_agent(ua);
        self
    }

    /// Build the client.
    pub fn build(self) -> FcResult<FcClient> {
        FcClient::new(self.config.build()?)
    }
}

fn invocation_path(
    service: &str,
    function: &str,
    qualifier: Option<&str>,
) -> FcResult<String> {
    if service.is_empty() {
        return Err(FcError::Validation {
            message: "service name is empty".to_string(),
            field: Some("service".to_string()),
        });
    }
    if function.is_empty() {
        return Err(FcError::Validation {
            message: "function name is empty".to_string(),
            field: Some("function".to_string()),
        });
    }

    let service_segment = match qualifier {
        Some(qualifier) if !qualifier.is_empty() => format!("{}.{}", service, qualifier),
        _ => service.to_string(),
    };
    Ok(format!(
        "/{}/services/{}/functions/{}/invocations",
        API_VERSION, service_segment, function
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FcConfig;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(endpoint: &str) -> FcClient {
        FcClient::builder()
            .endpoint(endpoint)
            .account_id("1234567890")
            .credentials("LTAI4ExampleAccessKey", "example-secret")
            .build()
            .unwrap()
    }

    #[test]
    fn test_invocation_type_as_str() {
        assert_eq!(InvocationType::Sync.as_str(), "Sync");
        assert_eq!(InvocationType::Async.as_str(), "Async");
        assert_eq!(InvocationType::default(), InvocationType::Sync);
    }

    #[test]
    fn test_invocation_path_without_qualifier() {
        assert_eq!(
            invocation_path("demo", "echo", None).unwrap(),
            "/2016-08-15/services/demo/functions/echo/invocations"
        );
    }

    #[test]
    fn test_invocation_path_with_qualifier() {
        assert_eq!(
            invocation_path("demo", "echo", Some("LATEST")).unwrap(),
            "/2016-08-15/services/demo.LATEST/functions/echo/invocations"
        );
    }

    #[test]
    fn test_invocation_path_empty_qualifier_ignored() {
        assert_eq!(
            invocation_path("demo", "echo", Some("")).unwrap(),
            "/2016-08-15/services/demo/functions/echo/invocations"
        );
    }

    #[test]
    fn test_invocation_path_rejects_empty_names() {
        assert!(matches!(
            invocation_path("", "echo", None),
            Err(FcError::Validation { .. })
        ));
        assert!(matches!(
            invocation_path("demo", "", None),
            Err(FcError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_invoke_function_hits_invocation_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2016-08-15/services/demo/functions/echo/invocations"))
            .and(header(INVOCATION_TYPE_HEADER, "Sync"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello back"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client
            .invoke_function("demo", "echo", b"hello".to_vec())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.text(), "hello back");
    }

    #[tokio::test]
    async fn test_invoke_function_async_with_qualifier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(
                "/2016-08-15/services/demo.LATEST/functions/echo/invocations",
            ))
            .and(header(INVOCATION_TYPE_HEADER, "Async"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client
            .invoke_function_with(
                "demo",
                "echo",
                Some("LATEST"),
                InvocationType::Async,
                b"hello".to_vec(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 202);
    }

    #[tokio::test]
    async fn test_client_from_config() {
        let config = FcConfig::builder()
            .region("cn-hangzhou")
            .account_id("1234567890")
            .credentials("LTAI4ExampleAccessKey", "example-secret")
            .build()
            .unwrap();

        let client = FcClient::new(config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://1234567890.cn-hangzhou.fc.aliyuncs.com"
        );
    }
}
