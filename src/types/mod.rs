//! Shared request/response types.

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use serde::{Deserialize, Deserializer, de::Error as _};
use url::Url;

use crate::error::{Error, Result};

/// Ordered header list. Names may repeat.
pub type HeaderList = Vec<(String, String)>;

/// A fully signed request, ready for a [`Transport`](crate::Transport).
#[derive(Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL including the canonical query string.
    pub url: Url,
    /// Caller headers plus `host`, `x-amz-*` and `authorization`.
    pub headers: HeaderMap,
    /// Request body; empty for GET/HEAD/DELETE.
    pub body: Bytes,
}

impl std::fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| {
                let value = if *name == http::header::AUTHORIZATION {
                    "<redacted>"
                } else {
                    value.to_str().unwrap_or("<binary>")
                };
                (name.as_str(), value)
            })
            .collect::<Vec<_>>();

        f.debug_struct("SignedRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}

/// A response as received from the transport, before any transform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers in wire order.
    pub headers: HeaderList,
    /// Full response body.
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderList, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Returns the body as UTF-8 text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| Error::parse(None, format!("response body is not valid UTF-8: {e}")))
    }
}

/// Output of a GET that keeps the response headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectWithHeaders {
    /// Object content.
    pub body: String,
    /// Response headers in wire order.
    pub headers: HeaderList,
}

/// Result of listing a bucket.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct KeyList {
    /// Bucket name.
    pub name: String,
    /// Prefix filter, if sent back.
    pub prefix: Option<String>,
    /// Marker this page started after, if sent back.
    pub marker: Option<String>,
    /// Marker for the next page, if any.
    pub next_marker: Option<String>,
    /// Maximum number of keys requested.
    pub max_keys: u32,
    /// Whether more keys remain.
    pub is_truncated: bool,
    /// Listed keys in response order.
    pub keys: Vec<Key>,
}

/// One `Contents` entry of a listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub key: String,
    pub last_modified: String,
    pub etag: String,
    pub size: u64,
    pub storage_class: String,
    pub owner: Owner,
}

/// Object owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Owner {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlError {
    #[serde(rename = "Code")]
    pub(crate) code: Option<String>,
    #[serde(rename = "Message")]
    pub(crate) message: Option<String>,
    #[serde(rename = "RequestId")]
    pub(crate) request_id: Option<String>,
    #[serde(rename = "HostId")]
    pub(crate) host_id: Option<String>,
}

// Field order is free: Amazon sends Owner before StorageClass, Spaces the
// other way round, and both must decode.
#[derive(Debug, Deserialize)]
pub(crate) struct XmlListBucketResult {
    #[serde(rename = "Name")]
    pub(crate) name: String,
    #[serde(rename = "Prefix", default)]
    pub(crate) prefix: Option<String>,
    #[serde(rename = "Marker", default)]
    pub(crate) marker: Option<String>,
    #[serde(rename = "NextMarker", default)]
    pub(crate) next_marker: Option<String>,
    #[serde(rename = "MaxKeys", deserialize_with = "lenient_u32")]
    pub(crate) max_keys: u32,
    #[serde(rename = "IsTruncated", deserialize_with = "lenient_bool")]
    pub(crate) is_truncated: bool,
    #[serde(rename = "Contents", default)]
    pub(crate) contents: Vec<XmlContents>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlContents {
    #[serde(rename = "Key")]
    pub(crate) key: String,
    #[serde(rename = "LastModified")]
    pub(crate) last_modified: String,
    #[serde(rename = "ETag")]
    pub(crate) etag: String,
    #[serde(rename = "Size", deserialize_with = "lenient_u64")]
    pub(crate) size: u64,
    #[serde(rename = "StorageClass")]
    pub(crate) storage_class: String,
    #[serde(rename = "Owner")]
    pub(crate) owner: XmlOwner,
}

#[derive(Debug, Deserialize)]
pub(crate) struct XmlOwner {
    #[serde(rename = "ID")]
    pub(crate) id: String,
    #[serde(rename = "DisplayName")]
    pub(crate) display_name: String,
}

impl From<XmlListBucketResult> for KeyList {
    fn from(value: XmlListBucketResult) -> Self {
        Self {
            name: value.name,
            prefix: present(value.prefix),
            marker: present(value.marker),
            next_marker: present(value.next_marker),
            max_keys: value.max_keys,
            is_truncated: value.is_truncated,
            keys: value
                .contents
                .into_iter()
                .map(|c| Key {
                    key: c.key,
                    last_modified: c.last_modified,
                    etag: c.etag,
                    size: c.size,
                    storage_class: c.storage_class,
                    owner: Owner {
                        id: c.owner.id,
                        display_name: c.owner.display_name,
                    },
                })
                .collect(),
        }
    }
}

/// Servers send `<Prefix></Prefix>` when no prefix was given.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Strips surrounding whitespace and one pair of double quotes.
fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(trimmed)
}

pub(crate) fn parse_lenient_u64(raw: &str) -> Option<u64> {
    unquote(raw).parse::<u64>().ok()
}

pub(crate) fn parse_lenient_bool(raw: &str) -> Option<bool> {
    let value = unquote(raw);
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_lenient_u64(&raw)
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative integer, found `{raw}`")))
}

fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_lenient_u64(&raw)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| D::Error::custom(format!("expected a 32-bit integer, found `{raw}`")))
}

fn lenient_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_lenient_bool(&raw)
        .ok_or_else(|| D::Error::custom(format!("expected a boolean, found `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_numbers_accept_native_and_stringified_forms() {
        assert_eq!(parse_lenient_u64("42"), Some(42));
        assert_eq!(parse_lenient_u64(" 42\n"), Some(42));
        assert_eq!(parse_lenient_u64("\"42\""), Some(42));
        assert_eq!(parse_lenient_u64("-1"), None);
        assert_eq!(parse_lenient_u64("4k"), None);
        assert_eq!(parse_lenient_u64(""), None);
    }

    #[test]
    fn lenient_booleans_accept_native_and_stringified_forms() {
        assert_eq!(parse_lenient_bool("true"), Some(true));
        assert_eq!(parse_lenient_bool("\"false\""), Some(false));
        assert_eq!(parse_lenient_bool("True"), Some(true));
        assert_eq!(parse_lenient_bool("0"), Some(false));
        assert_eq!(parse_lenient_bool("yes"), None);
    }

    #[test]
    fn raw_response_text_rejects_invalid_utf8() {
        let ok = RawResponse::new(StatusCode::OK, Vec::new(), Bytes::from_static(b"hi"));
        assert_eq!(ok.text().unwrap(), "hi");

        let bad = RawResponse::new(StatusCode::OK, Vec::new(), vec![0xff, 0xfe]);
        assert!(matches!(bad.text(), Err(Error::Parse { .. })));
    }
}
