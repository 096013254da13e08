//! FC request signing.
//!
//! This module implements the signature scheme Function Compute uses to
//! authenticate API requests.
//!
//! # Overview
//!
//! Every request is authenticated with a keyed-hash signature computed over a
//! canonical representation of the request:
//!
//! 1. Refreshing the signing metadata - The `date` header and a per-request
//!    `x-fc-nonce` are regenerated before every attempt
//! 2. Creating the string-to-sign - Method, `Content-MD5`, `Content-Type`,
//!    `Date`, the sorted `x-fc-*` headers, and the request path
//! 3. Calculating the signature - HMAC-SHA256 of the string-to-sign with the
//!    access-key secret, base64-encoded
//! 4. Adding the Authorization header - `FC <access-key-id>:<signature>`
//!
//! # Components
//!
//! - **canonical** - Percent-encoding, query-string, URL-composition, and
//!   canonical-header primitives
//! - **fc** - The signature computation and per-attempt orchestration
//! - **error** - Error types for signing operations
//!
//! # Quick Start
//!
//! ```
//! use integrations_alicloud_fc::signing::{sign_request, SigningParams};
//! use http::HeaderMap;
//! use chrono::Utc;
//!
//! let params = SigningParams::new("LTAI4ExampleAccessKey", "example-secret");
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("content-type", "application/json".parse().unwrap());
//! headers.insert("x-fc-account-id", "1234567890".parse().unwrap());
//!
//! sign_request(
//!     "POST",
//!     "/2016-08-15/services/demo/functions/echo/invocations",
//!     &mut headers,
//!     &params,
//!     &Utc::now(),
//! ).unwrap();
//!
//! // The request now carries the signature and can be dispatched.
//! assert!(headers.contains_key("authorization"));
//! assert!(headers.contains_key("date"));
//! ```

mod canonical;
mod error;
mod fc;

// Re-export the public API
pub use canonical::{
    canonical_fc_headers, compose_url, encode_query_string, uri_encode, CANONICAL_HEADER_PREFIX,
};
pub use error::SigningError;
pub use fc::{
    compose_string_to_sign, format_date, md5_hex, refresh_sign_headers, sign_request, sign_string,
    SigningParams, FC_AUTH_SCHEME, NONCE_HEADER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        assert_eq!(uri_encode("test"), "test");
        assert_eq!(encode_query_string(&[]), "");
        assert_eq!(compose_url("https://example.com/p", &[]), "https://example.com/p");

        assert_eq!(FC_AUTH_SCHEME, "FC");
        assert_eq!(NONCE_HEADER, "x-fc-nonce");
        assert_eq!(CANONICAL_HEADER_PREFIX, "x-fc-");
    }

    #[test]
    fn test_signing_params_construction() {
        let params = SigningParams::new("AKID", "SECRET");
        assert_eq!(params.access_key_id, "AKID");
        assert_eq!(params.access_key_secret, "SECRET");
    }

    #[test]
    fn test_signature_length() {
        // HMAC-SHA256 is 32 bytes, 44 characters in base64.
        let signature = sign_string("message", "secret").unwrap();
        assert_eq!(signature.len(), 44);
    }
}
