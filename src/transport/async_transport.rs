use std::time::Duration;

#[cfg(feature = "metrics")]
use std::time::Instant;

use async_trait::async_trait;
#[cfg(feature = "metrics")]
use http::{Method, StatusCode};

use crate::{
    error::{Error, Result},
    transport::{Transport, TransportFailure},
    types::{RawResponse, SignedRequest},
    util,
};

/// [`Transport`] backed by `reqwest`. Success is decided by status code alone.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(user_agent: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        #[cfg(feature = "rustls")]
        crate::transport::tls::ensure_rustls_crypto_provider();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = builder.user_agent(user_agent.unwrap_or_else(default_user_agent));
        let client = builder
            .build()
            .map_err(|e| Error::transport("failed to build HTTP client", Some(Box::new(e))))?;

        Ok(Self { client })
    }

    async fn exchange(
        &self,
        request: SignedRequest,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        #[cfg(feature = "metrics")]
        let method = request.method.clone();
        #[cfg(feature = "metrics")]
        metrics::counter!("s3_http_attempts_total", "method" => method_label(&method))
            .increment(1);
        #[cfg(feature = "metrics")]
        let start = Instant::now();

        let mut req = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if !request.body.is_empty() {
            req = req.body(request.body);
        }

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(err) => {
                #[cfg(feature = "metrics")]
                metrics::counter!(
                    "s3_http_errors_total",
                    "method" => method_label(&method),
                    "kind" => "transport"
                )
                .increment(1);
                return Err(TransportFailure::request(
                    "request failed",
                    Some(Box::new(err)),
                ));
            }
        };

        let status = resp.status();
        let headers = util::headers::header_list(resp.headers());
        let body = resp.bytes().await.map_err(|e| {
            TransportFailure::request("failed to read response body", Some(Box::new(e)))
        })?;

        #[cfg(feature = "metrics")]
        {
            metrics::counter!(
                "s3_http_responses_total",
                "method" => method_label(&method),
                "class" => status_class(status),
            )
            .increment(1);
            metrics::histogram!(
                "s3_http_request_duration_seconds",
                "method" => method_label(&method),
            )
            .record(start.elapsed().as_secs_f64());
        }

        let raw = RawResponse::new(status, headers, body);
        if status.is_success() {
            Ok(raw)
        } else {
            Err(TransportFailure::Status(raw))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: SignedRequest,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "s3.http",
            method = %request.method,
            host = request.url.host_str().unwrap_or(""),
            path = request.url.path(),
        );

        let fut = self.exchange(request);
        #[cfg(feature = "tracing")]
        let fut = tracing::Instrument::instrument(fut, span);
        fut.await
    }
}

#[cfg(feature = "metrics")]
fn status_class(status: StatusCode) -> &'static str {
    if status.is_informational() {
        "1xx"
    } else if status.is_success() {
        "2xx"
    } else if status.is_redirection() {
        "3xx"
    } else if status.is_client_error() {
        "4xx"
    } else if status.is_server_error() {
        "5xx"
    } else {
        "other"
    }
}

#[cfg(feature = "metrics")]
fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "PUT" => "PUT",
        "HEAD" => "HEAD",
        "DELETE" => "DELETE",
        _ => "OTHER",
    }
}

fn default_user_agent() -> String {
    format!("s3-spaces/{}", env!("CARGO_PKG_VERSION"))
}
