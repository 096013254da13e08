//! Transport layer abstraction for HTTP communication.
//!
//! This module provides a pluggable transport for sending HTTP requests. The
//! default implementation uses reqwest; other implementations can be
//! provided for testing or alternative HTTP backends.

use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::time::Duration;

use crate::error::{FcError, FcResult};

/// Trait for HTTP transport implementations.
///
/// A transport sends exactly one already-signed request and reports the raw
/// outcome. Retry decisions live above it in the dispatch loop.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or times out.
    /// Transport-level failures are terminal for the whole call; the
    /// dispatch loop never retries them.
    async fn send(&self, request: Request) -> FcResult<Response>;
}

/// Reqwest-based HTTP transport implementation.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new reqwest transport.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use integrations_alicloud_fc::http::ReqwestTransport;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let transport = ReqwestTransport::new(
    ///     Duration::from_secs(60),
    ///     Duration::from_secs(10),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(timeout: Duration, connect_timeout: Duration) -> FcResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| FcError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { client })
    }

    /// Get a reference to the underlying reqwest client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> FcResult<Response> {
        self.client.execute(request).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_reqwest_transport_creation() {
        let transport = ReqwestTransport::new(Duration::from_secs(60), Duration::from_secs(10));
        assert!(transport.is_ok());
    }

    #[tokio::test]
    async fn test_transport_trait_object() {
        let transport =
            ReqwestTransport::new(Duration::from_secs(60), Duration::from_secs(10)).unwrap();
        let transport_arc: Arc<dyn Transport> = Arc::new(transport);
        let _: &dyn Transport = &*transport_arc;
    }
}
