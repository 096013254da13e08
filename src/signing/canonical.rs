//! Canonical request components for FC request signing.
//!
//! This module provides the percent-encoding, query-string, URL-composition,
//! and canonical-header primitives used by the signing process. The encoding
//! here must stay byte-for-byte identical to what the service derives on its
//! side, or signatures will not verify.

use http::HeaderMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters that should NOT be percent-encoded in query components.
///
/// According to RFC 3986, these characters are "unreserved" and are never
/// encoded: A-Z, a-z, 0-9, `-`, `_`, `.`, `~`. Everything else, including
/// the forward slash, is percent-encoded.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Header prefix that selects which headers participate in the signature.
pub const CANONICAL_HEADER_PREFIX: &str = "x-fc-";

/// Percent-encode a single query component.
///
/// Spaces become `%20` (never `+`), and the encoding is deterministic: the
/// same input always yields the same output.
///
/// # Examples
///
/// ```
/// use integrations_alicloud_fc::signing::uri_encode;
///
/// assert_eq!(uri_encode("plain-value_1.txt~"), "plain-value_1.txt~");
/// assert_eq!(uri_encode("hello world"), "hello%20world");
/// assert_eq!(uri_encode("a/b=c&d"), "a%2Fb%3Dc%26d");
/// ```
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_SET).to_string()
}

/// Join query parameters into a single encoded query string.
///
/// Each pair is rendered as `key=value` with both sides percent-encoded; a
/// pair whose value is absent is rendered as the bare key. Pairs are joined
/// with `&` and there is never a trailing `&`. An empty parameter list
/// yields an empty string.
///
/// The input order is preserved, so the output is stable within one call.
///
/// # Examples
///
/// ```
/// use integrations_alicloud_fc::signing::encode_query_string;
///
/// let params = vec![
///     ("limit".to_string(), Some("100".to_string())),
///     ("prefix".to_string(), Some("my func".to_string())),
///     ("all".to_string(), None),
/// ];
/// assert_eq!(encode_query_string(&params), "limit=100&prefix=my%20func&all");
///
/// assert_eq!(encode_query_string(&[]), "");
/// ```
pub fn encode_query_string(params: &[(String, Option<String>)]) -> String {
    params
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{}={}", uri_encode(key), uri_encode(value)),
            None => uri_encode(key),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Compose the final request URL from a base (endpoint + path) and query
/// parameters.
///
/// Separator rules: a `?` is appended when the base has none; a `&` is
/// appended when a `?` is already present and the base does not end in `?`.
/// The encoded query string is then appended when non-empty, and a single
/// trailing `?` or `&` is stripped so the empty-query case composes cleanly.
/// Repeated composition never produces `??` or `&&`.
///
/// # Examples
///
/// ```
/// use integrations_alicloud_fc::signing::compose_url;
///
/// let params = vec![("limit".to_string(), Some("10".to_string()))];
/// assert_eq!(
///     compose_url("https://fc.example.com/services", &params),
///     "https://fc.example.com/services?limit=10"
/// );
///
/// // A base that already carries a query gets `&`, not a second `?`.
/// assert_eq!(
///     compose_url("https://fc.example.com/services?a=1", &params),
///     "https://fc.example.com/services?a=1&limit=10"
/// );
///
/// // Empty query never leaves a dangling separator.
/// assert_eq!(
///     compose_url("https://fc.example.com/services", &[]),
///     "https://fc.example.com/services"
/// );
/// ```
pub fn compose_url(base: &str, params: &[(String, Option<String>)]) -> String {
    let mut url = String::from(base);
    if !url.contains('?') {
        url.push('?');
    } else if !url.ends_with('?') {
        url.push('&');
    }

    if !params.is_empty() {
        url.push_str(&encode_query_string(params));
    }

    if url.ends_with('?') || url.ends_with('&') {
        url.pop();
    }
    url
}

/// Build the canonicalized header block for the string-to-sign.
///
/// Headers whose lowercase name starts with `x-fc-` are selected, sorted by
/// name, and rendered one per line as `name:value\n`. The fixed sort order
/// makes serialization deterministic, which the server relies on to
/// re-derive the signature.
///
/// # Examples
///
/// ```
/// use http::HeaderMap;
/// use integrations_alicloud_fc::signing::canonical_fc_headers;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-fc-invocation-type", "Sync".parse().unwrap());
/// headers.insert("x-fc-account-id", "12345".parse().unwrap());
/// headers.insert("content-type", "application/json".parse().unwrap());
///
/// assert_eq!(
///     canonical_fc_headers(&headers),
///     "x-fc-account-id:12345\nx-fc-invocation-type:Sync\n"
/// );
/// ```
pub fn canonical_fc_headers(headers: &HeaderMap) -> String {
    use std::collections::BTreeMap;

    let mut selected: BTreeMap<String, &str> = BTreeMap::new();
    for (name, value) in headers {
        let name_lower = name.as_str().to_lowercase();
        if name_lower.starts_with(CANONICAL_HEADER_PREFIX) {
            selected.insert(name_lower, value.to_str().unwrap_or(""));
        }
    }

    selected
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value))
        .collect()
}
