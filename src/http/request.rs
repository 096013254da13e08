//! HTTP request types for the Function Compute API.
//!
//! This module provides type-safe request building. A built [`FcRequest`] is
//! immutable: the dispatch loop never mutates it, and every attempt derives
//! its own header overlay from the request's base headers.

use http::HeaderMap;
use serde::Serialize;

use crate::error::{FcError, FcResult};
use crate::signing::compose_url;

/// HTTP methods supported by the FC API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request
    GET,
    /// POST request
    POST,
    /// PUT request
    PUT,
    /// DELETE request
    DELETE,
}

impl HttpMethod {
    /// The method name as it appears on the wire and in the string-to-sign.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// A request to the Function Compute API.
///
/// Built once by the caller, then handed to the client. Query parameters
/// with an absent value are encoded as bare keys.
#[derive(Debug, Clone)]
pub struct FcRequest {
    /// HTTP method
    method: HttpMethod,

    /// Request path (e.g. "/2016-08-15/services")
    path: String,

    /// Query parameters; a `None` value renders as a bare key
    query_params: Vec<(String, Option<String>)>,

    /// Base HTTP headers, copied into a fresh overlay per attempt
    headers: HeaderMap,

    /// Request payload (if any)
    body: Option<Vec<u8>>,

    /// Content type
    content_type: Option<String>,
}

impl FcRequest {
    /// Create a new GET request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_alicloud_fc::http::FcRequest;
    ///
    /// let request = FcRequest::get("/2016-08-15/services");
    /// ```
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::GET, path)
    }

    /// Create a new POST request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_alicloud_fc::http::FcRequest;
    ///
    /// let request = FcRequest::post("/2016-08-15/services/demo/functions/echo/invocations");
    /// ```
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::POST, path)
    }

    /// Create a new PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::PUT, path)
    }

    /// Create a new DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::DELETE, path)
    }

    /// Create a new request with the specified method.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_params: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            content_type: None,
        }
    }

    /// Add a query parameter to the request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_alicloud_fc::http::FcRequest;
    ///
    /// let request = FcRequest::get("/2016-08-15/services")
    ///     .query("limit", "100")
    ///     .query("prefix", "demo");
    /// ```
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), Some(value.into())));
        self
    }

    /// Add a valueless query parameter, rendered as a bare key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_alicloud_fc::http::FcRequest;
    ///
    /// let request = FcRequest::get("/2016-08-15/services").query_flag("all");
    /// ```
    pub fn query_flag(mut self, key: impl Into<String>) -> Self {
        self.query_params.push((key.into(), None));
        self
    }

    /// Add a header to the request.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name or value is not valid HTTP
    /// header text.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> FcResult<Self> {
        let header_name = http::header::HeaderName::from_bytes(key.as_ref().as_bytes()).map_err(
            |e| FcError::Validation {
                message: format!("Invalid header name: {}", e),
                field: Some("header".to_string()),
            },
        )?;

        let header_value =
            http::header::HeaderValue::from_str(value.as_ref()).map_err(|e| FcError::Validation {
                message: format!("Invalid header value: {}", e),
                field: Some("header".to_string()),
            })?;

        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Set the request payload as raw bytes.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request payload as JSON.
    ///
    /// Serializes the provided value and sets the content type to
    /// `application/json`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_alicloud_fc::http::FcRequest;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Payload {
    ///     name: String,
    /// }
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let request = FcRequest::post("/2016-08-15/services/demo/functions/echo/invocations")
    ///     .json(&Payload { name: "world".to_string() })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn json<T: Serialize>(mut self, json: &T) -> FcResult<Self> {
        let body = serde_json::to_vec(json)?;
        self.body = Some(body);
        self.content_type = Some("application/json".to_string());
        Ok(self)
    }

    /// Override the content type.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Get the HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Get the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the query parameters.
    pub fn params(&self) -> &[(String, Option<String>)] {
        &self.query_params
    }

    /// Get the base headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the request payload.
    pub fn payload(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Get the content type.
    pub fn payload_content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Check the request shape before any attempt is dispatched.
    ///
    /// A malformed request fails the whole call immediately; nothing is
    /// signed or sent.
    ///
    /// # Errors
    ///
    /// Returns [`FcError::Validation`] when the path is empty or does not
    /// start with `/`.
    pub fn validate(&self) -> FcResult<()> {
        if self.path.is_empty() {
            return Err(FcError::Validation {
                message: "request path is empty".to_string(),
                field: Some("path".to_string()),
            });
        }
        if !self.path.starts_with('/') {
            return Err(FcError::Validation {
                message: format!("request path must start with '/': {}", self.path),
                field: Some("path".to_string()),
            });
        }
        Ok(())
    }

    /// Build the full URL for this request.
    ///
    /// The query string is percent-encoded and merged with the separator
    /// rules of [`compose_url`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use integrations_alicloud_fc::http::FcRequest;
    ///
    /// let request = FcRequest::get("/2016-08-15/services").query("limit", "100");
    ///
    /// let url = request.build_url("https://123.cn-hangzhou.fc.aliyuncs.com");
    /// assert_eq!(
    ///     url,
    ///     "https://123.cn-hangzhou.fc.aliyuncs.com/2016-08-15/services?limit=100"
    /// );
    /// ```
    pub fn build_url(&self, endpoint: &str) -> String {
        let base = format!("{}{}", endpoint, self.path);
        compose_url(&base, &self.query_params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::GET.as_str(), "GET");
        assert_eq!(HttpMethod::POST.as_str(), "POST");
        assert_eq!(HttpMethod::PUT.as_str(), "PUT");
        assert_eq!(HttpMethod::DELETE.as_str(), "DELETE");
    }

    #[test]
    fn test_request_constructors() {
        let request = FcRequest::get("/2016-08-15/services");
        assert_eq!(request.method(), HttpMethod::GET);
        assert_eq!(request.path(), "/2016-08-15/services");

        let request = FcRequest::post("/2016-08-15/services");
        assert_eq!(request.method(), HttpMethod::POST);

        let request = FcRequest::put("/2016-08-15/services/demo");
        assert_eq!(request.method(), HttpMethod::PUT);

        let request = FcRequest::delete("/2016-08-15/services/demo");
        assert_eq!(request.method(), HttpMethod::DELETE);
    }

    #[test]
    fn test_request_query() {
        let request = FcRequest::get("/2016-08-15/services")
            .query("limit", "100")
            .query_flag("all");

        assert_eq!(request.params().len(), 2);
        assert_eq!(
            request.params()[0],
            ("limit".to_string(), Some("100".to_string()))
        );
        assert_eq!(request.params()[1], ("all".to_string(), None));
    }

    #[test]
    fn test_request_header() {
        let request = FcRequest::post("/2016-08-15/services")
            .header("x-fc-invocation-type", "Async")
            .unwrap();

        assert!(request.headers().contains_key("x-fc-invocation-type"));
    }

    #[test]
    fn test_request_invalid_header_rejected() {
        let result = FcRequest::post("/p").header("bad header name", "v");
        assert!(matches!(result, Err(FcError::Validation { .. })));
    }

    #[test]
    fn test_request_body() {
        let body = b"payload".to_vec();
        let request = FcRequest::post("/p").body(body.clone());
        assert_eq!(request.payload(), Some(body.as_slice()));
    }

    #[test]
    fn test_request_json() {
        #[derive(Serialize)]
        struct TestData {
            name: String,
            value: i32,
        }

        let request = FcRequest::post("/p")
            .json(&TestData {
                name: "test".to_string(),
                value: 42,
            })
            .unwrap();

        assert!(request.payload().is_some());
        assert_eq!(request.payload_content_type(), Some("application/json"));
    }

    #[test]
    fn test_validate_accepts_well_formed_path() {
        assert!(FcRequest::get("/2016-08-15/services").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let result = FcRequest::get("").validate();
        assert!(matches!(result, Err(FcError::Validation { .. })));
    }

    #[test]
    fn test_validate_rejects_relative_path() {
        let result = FcRequest::get("services").validate();
        assert!(matches!(result, Err(FcError::Validation { .. })));
    }

    #[test]
    fn test_build_url() {
        let request = FcRequest::get("/2016-08-15/services")
            .query("limit", "100")
            .query("prefix", "my func");

        let url = request.build_url("https://123.cn-hangzhou.fc.aliyuncs.com");
        assert_eq!(
            url,
            "https://123.cn-hangzhou.fc.aliyuncs.com/2016-08-15/services?limit=100&prefix=my%20func"
        );
    }

    #[test]
    fn test_build_url_no_query() {
        let request = FcRequest::get("/2016-08-15/services");
        let url = request.build_url("https://123.cn-hangzhou.fc.aliyuncs.com");
        assert_eq!(url, "https://123.cn-hangzhou.fc.aliyuncs.com/2016-08-15/services");
        assert!(!url.contains('?'));
    }
}
