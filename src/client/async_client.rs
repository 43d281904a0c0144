use std::{sync::Arc, time::Duration};

use crate::{
    account::Account,
    auth::Credentials,
    clock::{Clock, SystemClock},
    endpoint::Endpoint,
    error::{Error, Result},
    request::{Request, RequestDescriptor, ResponseTransform},
    transport::{self, HttpTransport, Transport, TransportFailure},
    types::SignedRequest,
    util,
};

/// Signs and dispatches [`Request`]s for any [`Account`].
///
/// Cheap to clone; clones share the transport and clock.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

pub struct ClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    clock: Arc<dyn Clock>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

struct Inner {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// A client with the bundled HTTP transport and the system clock.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Signs `request` for `account` without sending it.
    pub fn sign<T>(&self, account: &Account, request: &Request<T>) -> Result<SignedRequest> {
        let endpoint = Endpoint::for_account(account);
        util::signing::sign_request(
            request.descriptor(),
            &endpoint,
            account.credentials(),
            self.inner.clock.now(),
        )
    }

    /// Resolves the account's endpoint, signs, sends and applies the
    /// request's transform.
    pub async fn send<T>(&self, account: &Account, request: Request<T>) -> Result<T> {
        let (descriptor, transform) = request.into_parts();
        let endpoint = Endpoint::for_account(account);

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "s3.request",
            method = %descriptor.method(),
            provider = endpoint.provider().as_str(),
            host = endpoint.host(),
            path = descriptor.path(),
        );

        let fut = self.dispatch(&endpoint, &descriptor, account.credentials(), transform);
        #[cfg(feature = "tracing")]
        let fut = tracing::Instrument::instrument(fut, span);
        fut.await
    }

    async fn dispatch<T>(
        &self,
        endpoint: &Endpoint,
        descriptor: &RequestDescriptor,
        credentials: &Credentials,
        transform: ResponseTransform<T>,
    ) -> Result<T> {
        let now = self.inner.clock.now();
        let signed = util::signing::sign_request(descriptor, endpoint, credentials, now)?;

        let resp = match self.inner.transport.send(signed).await {
            Ok(resp) => resp,
            Err(TransportFailure::MalformedPayload(resp)) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    status = resp.status.as_u16(),
                    body_len = resp.body.len(),
                    "recovered response body from malformed-payload failure"
                );
                resp
            }
            Err(TransportFailure::Status(resp)) => {
                let err = transport::response_error(&resp);
                #[cfg(feature = "tracing")]
                tracing::debug!(status = resp.status.as_u16(), "request rejected by service");
                return Err(err);
            }
            Err(TransportFailure::Request { message, source }) => {
                return Err(Error::transport(message, source));
            }
        };

        transform(resp)
    }
}

impl ClientBuilder {
    fn new() -> Self {
        Self {
            transport: None,
            clock: Arc::new(SystemClock),
            timeout: None,
            user_agent: None,
        }
    }

    /// Total request timeout for the bundled transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the bundled HTTP transport. `timeout` and `user_agent` are
    /// then ignored.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<Client> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::invalid_config("timeout must be greater than zero"));
        }
        if let Some(ua) = &self.user_agent
            && ua.trim().is_empty()
        {
            return Err(Error::invalid_config("user agent must not be blank"));
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.user_agent, self.timeout)?),
        };

        Ok(Client {
            inner: Arc::new(Inner {
                transport,
                clock: self.clock,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn client_is_send_and_sync() {
        assert_send_sync::<Client>();
    }

    #[test]
    fn builder_rejects_zero_timeout() {
        let err = Client::builder()
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn builder_rejects_blank_user_agent() {
        let err = Client::builder().user_agent("  ").build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
