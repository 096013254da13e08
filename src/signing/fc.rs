//! FC request signature implementation.
//!
//! Requests to Function Compute are authenticated with a keyed-hash
//! signature over a canonical string-to-sign:
//!
//! 1. Refresh the signing metadata headers (`date`, `x-fc-nonce`) so every
//!    attempt is signed over fresh, unique input
//! 2. Serialize {method, Content-MD5, Content-Type, Date, canonical
//!    `x-fc-*` headers, path} into the string-to-sign
//! 3. Compute HMAC-SHA256 over it with the access-key secret
//! 4. Base64-encode the digest and write the `Authorization` header
//!
//! Wire format of the header: `FC <access-key-id>:<base64-signature>`.

use super::canonical::canonical_fc_headers;
use super::error::SigningError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use http::HeaderMap;
use md5::{Digest, Md5};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Authorization scheme tag for FC signatures.
pub const FC_AUTH_SCHEME: &str = "FC";

/// Header carrying the per-request nonce.
pub const NONCE_HEADER: &str = "x-fc-nonce";

/// Credential material used to sign a request.
///
/// # Examples
///
/// ```
/// use integrations_alicloud_fc::signing::SigningParams;
///
/// let params = SigningParams::new("LTAI4Example", "secret-value");
/// assert_eq!(params.access_key_id, "LTAI4Example");
/// ```
#[derive(Clone, Debug)]
pub struct SigningParams {
    /// Access key id, embedded in the Authorization header.
    pub access_key_id: String,
    /// Access key secret, the HMAC key. Never transmitted.
    pub access_key_secret: String,
}

impl SigningParams {
    /// Create signing parameters from an access key pair.
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }
}

/// Format a timestamp as an RFC 1123 GMT date header value.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use integrations_alicloud_fc::signing::format_date;
///
/// let dt = Utc.with_ymd_and_hms(2023, 12, 15, 10, 30, 45).unwrap();
/// assert_eq!(format_date(&dt), "Fri, 15 Dec 2023 10:30:45 GMT");
/// ```
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Compute the uppercase hex MD5 digest of a payload.
///
/// This is the value of the `Content-MD5` header the service uses to verify
/// payload integrity.
///
/// # Examples
///
/// ```
/// use integrations_alicloud_fc::signing::md5_hex;
///
/// assert_eq!(md5_hex(b""), "D41D8CD98F00B204E9800998ECF8427E");
/// ```
pub fn md5_hex(payload: &[u8]) -> String {
    hex::encode_upper(Md5::digest(payload))
}

/// Insert fresh signing metadata into the header overlay.
///
/// Overwrites the `date` header with the current GMT timestamp and
/// `x-fc-nonce` with a new random UUID. The nonce guarantees that two
/// signatures over the same logical request always differ, so a retried
/// attempt cannot be rejected as a replay of the previous one.
pub fn refresh_sign_headers(
    headers: &mut HeaderMap,
    now: &DateTime<Utc>,
) -> Result<(), SigningError> {
    let date = format_date(now);
    headers.insert(
        "date",
        date.parse()
            .map_err(|_| SigningError::InvalidHeaderValue { name: "date".to_string() })?,
    );

    let nonce = Uuid::new_v4().to_string();
    headers.insert(
        NONCE_HEADER,
        nonce
            .parse()
            .map_err(|_| SigningError::InvalidHeaderValue { name: NONCE_HEADER.to_string() })?,
    );
    Ok(())
}

/// Serialize the request into the canonical string-to-sign.
///
/// Layout, each segment terminated by `\n`:
///
/// ```text
/// HTTPMethod
/// Content-MD5
/// Content-Type
/// Date
/// canonicalized x-fc-* headers (sorted, one per line)
/// path
/// ```
///
/// Serialization is deterministic: identical inputs always produce an
/// identical string, and changing the method, path, or any signed header
/// changes the output.
pub fn compose_string_to_sign(method: &str, path: &str, headers: &HeaderMap) -> String {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
    };

    format!(
        "{}\n{}\n{}\n{}\n{}{}",
        method.to_uppercase(),
        header_str("content-md5"),
        header_str("content-type"),
        header_str("date"),
        canonical_fc_headers(headers),
        path
    )
}

/// Compute the base64-encoded HMAC-SHA256 signature of a string-to-sign.
///
/// Fails if the secret is blank or the keyed-hash primitive rejects the
/// key; both are configuration faults and are never retried.
pub fn sign_string(string_to_sign: &str, access_key_secret: &str) -> Result<String, SigningError> {
    if access_key_secret.is_empty() {
        return Err(SigningError::MissingCredential { field: "access_key_secret".to_string() });
    }

    let mut mac = HmacSha256::new_from_slice(access_key_secret.as_bytes()).map_err(|_| {
        SigningError::SigningFailed { message: "HMAC-SHA256 rejected the signing key".to_string() }
    })?;
    mac.update(string_to_sign.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Sign a request, writing the signature into the header overlay.
///
/// Refreshes the signing metadata, composes the string-to-sign over
/// {method, path, headers}, computes the signature, and inserts the
/// `Authorization` header. Called once per dispatch attempt so every
/// attempt carries a fresh timestamp, nonce, and signature.
///
/// # Errors
///
/// Returns [`SigningError::MissingCredential`] when the access key id or
/// secret is blank. These are fatal preconditions, not retryable failures.
pub fn sign_request(
    method: &str,
    path: &str,
    headers: &mut HeaderMap,
    params: &SigningParams,
    now: &DateTime<Utc>,
) -> Result<(), SigningError> {
    if params.access_key_id.is_empty() {
        return Err(SigningError::MissingCredential { field: "access_key_id".to_string() });
    }
    if params.access_key_secret.is_empty() {
        return Err(SigningError::MissingCredential { field: "access_key_secret".to_string() });
    }

    refresh_sign_headers(headers, now)?;

    let string_to_sign = compose_string_to_sign(method, path, headers);
    let signature = sign_string(&string_to_sign, &params.access_key_secret)?;

    let authorization = format!("{} {}:{}", FC_AUTH_SCHEME, params.access_key_id, signature);
    headers.insert(
        "authorization",
        authorization
            .parse()
            .map_err(|_| SigningError::InvalidHeaderValue { name: "authorization".to_string() })?,
    );
    Ok(())
}
