//! The network seam: anything that can carry a [`SignedRequest`].

use std::{error::Error as StdError, fmt};

use async_trait::async_trait;

use crate::types::{RawResponse, SignedRequest};

pub(crate) mod async_transport;
#[cfg(feature = "rustls")]
pub(crate) mod tls;

pub use async_transport::HttpTransport;

/// Performs one HTTP exchange.
///
/// Implementations must not retry; a 2xx answer is `Ok`, everything else is a
/// [`TransportFailure`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: SignedRequest) -> Result<RawResponse, TransportFailure>;
}

/// Why a transport did not return a successful response.
#[non_exhaustive]
pub enum TransportFailure {
    /// No usable response: connect, TLS, timeout or body read failure.
    Request {
        message: String,
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    },
    /// The service answered with a non-2xx status.
    Status(RawResponse),
    /// The exchange completed but the transport rejected the payload it
    /// carried. The response is attached and is the real result.
    MalformedPayload(RawResponse),
}

impl TransportFailure {
    pub fn request(
        message: impl Into<String>,
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self::Request {
            message: message.into(),
            source,
        }
    }
}

impl fmt::Debug for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { message, source } => f
                .debug_struct("Request")
                .field("message", message)
                .field("source", source)
                .finish(),
            Self::Status(resp) => f.debug_tuple("Status").field(&resp.status).finish(),
            Self::MalformedPayload(resp) => f
                .debug_tuple("MalformedPayload")
                .field(&resp.status)
                .finish(),
        }
    }
}

/// Builds an [`Error::Api`](crate::Error::Api) from a non-2xx response.
pub(crate) fn response_error(resp: &RawResponse) -> crate::Error {
    let request_id = crate::util::headers::find_header(&resp.headers, "x-amz-request-id")
        .map(str::to_string);

    let body_str = String::from_utf8_lossy(&resp.body);
    let snippet = if body_str.trim().is_empty() {
        None
    } else {
        Some(crate::util::text::truncate_snippet(&body_str, 4096))
    };

    match crate::util::xml::parse_error_xml(&body_str) {
        Some(parsed) => crate::Error::Api {
            status: resp.status,
            code: parsed.code,
            message: parsed.message,
            request_id: parsed.request_id.or(request_id),
            host_id: parsed.host_id,
            body_snippet: snippet,
        },
        None => crate::Error::Api {
            status: resp.status,
            code: None,
            message: None,
            request_id,
            host_id: None,
            body_snippet: snippet,
        },
    }
}
