//! HTTP response types and terminal classification.
//!
//! A dispatched attempt yields an [`FcResponse`]. The retry loop consults
//! only the status; once an attempt is terminal, [`FcResponse::into_error`]
//! turns a non-success response into the classified [`FcError`] variant.

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{
    FcError, FcResult, ERR_INTERNAL_SERVICE, ERR_RESPONSE_NOT_PARSABLE, ERR_SERVER_UNREACHABLE,
    ERR_UNKNOWN,
};

/// Response header carrying the service-assigned request id.
pub const REQUEST_ID_HEADER: &str = "x-fc-request-id";

/// Error payload shape returned by the FC API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "ErrorCode")]
    code: Option<String>,
    #[serde(rename = "ErrorMessage")]
    message: Option<String>,
}

/// A response from the Function Compute API.
///
/// Immutable snapshot of an attempt's outcome: status, lower-cased headers,
/// body bytes, and the extracted request id.
#[derive(Debug, Clone)]
pub struct FcResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl FcResponse {
    /// Build a response from a reqwest response, draining the body.
    ///
    /// # Errors
    ///
    /// A network failure while reading the body maps to the
    /// [`ERR_SERVER_UNREACHABLE`] client error, the same as a failure to
    /// reach the service at all.
    pub async fn from_reqwest(response: reqwest::Response) -> FcResult<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_lowercase(),
                    value.to_str().unwrap_or("").to_string(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Build a response from raw parts.
    pub fn from_parts(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// True when the status is below 300.
    pub fn is_success(&self) -> bool {
        self.status < 300
    }

    /// True when the status is 500 or above, the only class the dispatch
    /// loop retries.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Get a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Get all headers (names lower-cased).
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Get the response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get the response body as text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> FcResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Get the service-assigned request id, if the response carried one.
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    /// Classify a non-success response into its terminal error.
    ///
    /// - status >= 500: the body is parsed as an FC error payload; an
    ///   unparsable or codeless body synthesizes [`ERR_INTERNAL_SERVICE`]
    /// - status in [300, 500): an empty body yields
    ///   [`ERR_SERVER_UNREACHABLE`], an unparsable body
    ///   [`ERR_RESPONSE_NOT_PARSABLE`], and a parsed payload without a code
    ///   [`ERR_UNKNOWN`]
    ///
    /// Either class is stamped with the final status and the request id
    /// when present.
    pub fn into_error(self) -> FcError {
        let request_id = self.request_id().map(String::from);

        if self.status >= 500 {
            let (code, message) = match serde_json::from_slice::<ErrorBody>(&self.body) {
                Ok(ErrorBody {
                    code: Some(code),
                    message,
                }) => (code, message.unwrap_or_default()),
                _ => (
                    ERR_INTERNAL_SERVICE.to_string(),
                    "Failed to parse response content".to_string(),
                ),
            };
            return FcError::Server {
                code,
                message,
                request_id,
                status_code: self.status,
            };
        }

        let (code, message) = if self.body.is_empty() {
            (
                ERR_SERVER_UNREACHABLE.to_string(),
                "Failed to get response content".to_string(),
            )
        } else {
            match serde_json::from_slice::<ErrorBody>(&self.body) {
                Ok(ErrorBody {
                    code: Some(code),
                    message,
                }) => (code, message.unwrap_or_default()),
                Ok(ErrorBody { code: None, message }) => (
                    ERR_UNKNOWN.to_string(),
                    message.unwrap_or_else(|| "Unknown client error".to_string()),
                ),
                Err(_) => (
                    ERR_RESPONSE_NOT_PARSABLE.to_string(),
                    "Failed to parse response content".to_string(),
                ),
            }
        };

        FcError::Client {
            code,
            message,
            request_id,
            status_code: Some(self.status),
        }
    }
}
