//! Unsigned request descriptors and the typed requests built on them.

use std::fmt;

use bytes::Bytes;
use http::Method;

use crate::{
    error::Result,
    types::{HeaderList, RawResponse},
};

/// Request payload: nothing, or bytes with their mime type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    Empty,
    Bytes { bytes: Bytes, mime: String },
}

impl Body {
    pub fn empty() -> Self {
        Self::Empty
    }

    pub fn bytes(mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self::Bytes {
            bytes: bytes.into(),
            mime: mime.into(),
        }
    }

    pub fn string(mime: impl Into<String>, text: impl Into<String>) -> Self {
        Self::bytes(mime, Bytes::from(text.into()))
    }

    pub fn html(html: impl Into<String>) -> Self {
        Self::string("text/html", html)
    }

    pub fn json(value: &serde_json::Value) -> Self {
        Self::string("application/json", value.to_string())
    }

    pub fn mime(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Bytes { mime, .. } => Some(mime),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Bytes { bytes, .. } => bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Method, path, query, headers and body of a request, before signing.
///
/// Query and header entries keep insertion order and duplicates; both are
/// sent as given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderList,
    body: Body,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub fn add_query<I, K, V>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(items.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn add_headers<I, K, V>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(items.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }
}

/// Turns the raw response of an exchange into the operation's result.
pub type ResponseTransform<T> = fn(RawResponse) -> Result<T>;

/// A request descriptor paired with the transform applied to its response.
pub struct Request<T> {
    descriptor: RequestDescriptor,
    transform: ResponseTransform<T>,
}

impl<T> Request<T> {
    pub fn new(descriptor: RequestDescriptor, transform: ResponseTransform<T>) -> Self {
        Self {
            descriptor,
            transform,
        }
    }

    pub fn add_query<I, K, V>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.descriptor = self.descriptor.add_query(items);
        self
    }

    pub fn add_headers<I, K, V>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.descriptor = self.descriptor.add_headers(items);
        self
    }

    /// Appends an `x-amz-acl` header.
    pub fn with_acl(self, acl: CannedAcl) -> Self {
        self.add_headers([("x-amz-acl", acl.as_str())])
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    pub fn transform(&self) -> ResponseTransform<T> {
        self.transform
    }

    pub fn into_parts(self) -> (RequestDescriptor, ResponseTransform<T>) {
        (self.descriptor, self.transform)
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("descriptor", &self.descriptor)
            .field("transform", &"<fn>")
            .finish()
    }
}

/// Listing parameters, mapped onto S3 query names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListQuery {
    Delimiter(String),
    Marker(String),
    MaxKeys(u32),
    Prefix(String),
    /// Sent verbatim.
    Other(String, String),
}

impl ListQuery {
    pub fn to_pair(&self) -> (String, String) {
        match self {
            Self::Delimiter(v) => ("delimiter".to_string(), v.clone()),
            Self::Marker(v) => ("marker".to_string(), v.clone()),
            Self::MaxKeys(v) => ("max-keys".to_string(), v.to_string()),
            Self::Prefix(v) => ("prefix".to_string(), v.clone()),
            Self::Other(k, v) => (k.clone(), v.clone()),
        }
    }
}

/// Predefined grants sent in `x-amz-acl`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CannedAcl {
    Private,
    PublicRead,
    PublicReadWrite,
    AwsExecRead,
    AuthenticatedRead,
    BucketOwnerRead,
    BucketOwnerFullControl,
    LogDeliveryWrite,
}

impl CannedAcl {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AwsExecRead => "aws-exec-read",
            Self::AuthenticatedRead => "authenticated-read",
            Self::BucketOwnerRead => "bucket-owner-read",
            Self::BucketOwnerFullControl => "bucket-owner-full-control",
            Self::LogDeliveryWrite => "log-delivery-write",
        }
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
