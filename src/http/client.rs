//! Signed HTTP dispatch with bounded retry.
//!
//! [`FcHttpClient`] owns the per-attempt pipeline: copy the immutable
//! request's headers into a fresh overlay, add the standard headers, sign,
//! send, and classify. A status >= 500 is retried immediately with a fresh
//! signature until the attempt budget runs out; everything else is terminal
//! on the first attempt.

use chrono::Utc;
use http::HeaderMap;
use std::sync::Arc;

use crate::config::FcConfig;
use crate::credentials::FcCredentials;
use crate::error::{FcError, FcResult};
use crate::http::request::{FcRequest, HttpMethod};
use crate::http::response::FcResponse;
use crate::http::transport::{ReqwestTransport, Transport};
use crate::signing::{md5_hex, sign_request, SigningParams};

/// User agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("alicloud-fc-rust/", env!("CARGO_PKG_VERSION"));

/// The signed-dispatch core of the client.
pub struct FcHttpClient {
    config: Arc<FcConfig>,
    transport: Arc<dyn Transport>,
    endpoint: String,
}

impl FcHttpClient {
    /// Create a client with the default reqwest transport.
    pub fn new(config: FcConfig) -> FcResult<Self> {
        let transport = ReqwestTransport::new(config.timeout, config.connect_timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with a custom transport.
    pub fn with_transport(config: FcConfig, transport: Arc<dyn Transport>) -> Self {
        let endpoint = config.fc_endpoint();
        Self {
            config: Arc::new(config),
            transport,
            endpoint,
        }
    }

    /// The resolved endpoint this client dispatches to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The active configuration.
    pub fn config(&self) -> &FcConfig {
        &self.config
    }

    /// Validate, then dispatch with the configured attempt budget.
    ///
    /// Each attempt rebuilds the header overlay and re-signs, so a retried
    /// attempt always carries a fresh timestamp, nonce, and signature. Only
    /// a status >= 500 consumes the budget; a status in [300, 500) and any
    /// transport-level failure terminate the call at once.
    pub async fn send_with_retry(&self, request: &FcRequest) -> FcResult<FcResponse> {
        request.validate()?;

        let max_attempts = self.config.max_attempts;
        let mut attempt = 1u32;

        loop {
            tracing::debug!(
                attempt,
                max_attempts,
                method = request.method().as_str(),
                path = request.path(),
                "dispatching request"
            );

            let credentials = self
                .config
                .credentials_provider
                .credentials()
                .await
                .map_err(|e| FcError::Credential {
                    message: e.to_string(),
                })?;

            let wire_request = self.build_request(request, &credentials)?;
            let raw = self.transport.send(wire_request).await?;
            let response = FcResponse::from_reqwest(raw).await?;

            if response.is_success() {
                tracing::debug!(status = response.status(), "request succeeded");
                return Ok(response);
            }

            if !response.is_server_error() || attempt >= max_attempts {
                tracing::debug!(
                    status = response.status(),
                    request_id = response.request_id(),
                    "terminal error response"
                );
                return Err(response.into_error());
            }

            tracing::warn!(
                status = response.status(),
                attempt,
                "server error, re-signing and retrying"
            );
            attempt += 1;
        }
    }

    /// Build one fully-signed wire request from the immutable request.
    ///
    /// The caller's request is never mutated; its base headers are copied
    /// into an overlay which then receives the standard headers and the
    /// signature.
    fn build_request(
        &self,
        request: &FcRequest,
        credentials: &FcCredentials,
    ) -> FcResult<reqwest::Request> {
        let mut headers = request.headers().clone();

        let user_agent = self.config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        insert_header(&mut headers, "user-agent", user_agent)?;
        insert_header(&mut headers, "accept", "application/json")?;
        insert_header(&mut headers, "x-fc-account-id", &self.config.account_id)?;

        // Always present, payload or not: content-type is part of the
        // string-to-sign and the server re-derives it.
        let content_type = request.payload_content_type().unwrap_or("application/json");
        insert_header(&mut headers, "content-type", content_type)?;

        if let Some(payload) = request.payload() {
            insert_header(&mut headers, "content-md5", &md5_hex(payload))?;
        }

        if let Some(token) = credentials.security_token() {
            insert_header(&mut headers, "x-fc-security-token", token)?;
        }

        let params = SigningParams::new(
            credentials.access_key_id(),
            credentials.access_key_secret(),
        );
        sign_request(
            request.method().as_str(),
            request.path(),
            &mut headers,
            &params,
            &Utc::now(),
        )?;

        let url = request.build_url(&self.endpoint);
        let url = url::Url::parse(&url).map_err(|e| FcError::Validation {
            message: format!("Invalid request URL {}: {}", url, e),
            field: Some("url".to_string()),
        })?;

        let method = match request.method() {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
        };

        let mut wire_request = reqwest::Request::new(method, url);
        *wire_request.headers_mut() = headers;
        if let Some(payload) = request.payload() {
            *wire_request.body_mut() = Some(payload.to_vec().into());
        }
        Ok(wire_request)
    }
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> FcResult<()> {
    let value = http::header::HeaderValue::from_str(value).map_err(|_| FcError::Validation {
        message: format!("Invalid value for header: {}", name),
        field: Some(name.to_string()),
    })?;
    headers.insert(name, value);
    Ok(())
}
