#![allow(dead_code)]

use std::{
    env,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};

use async_trait::async_trait;
use http::StatusCode;

use s3_spaces::{
    Account, Credentials, Error, Provider, Transport, TransportFailure,
    types::{RawResponse, SignedRequest},
};

/// What [`FakeTransport`] answers with.
#[derive(Clone)]
pub(crate) enum Reply {
    Ok(RawResponse),
    Status(RawResponse),
    MalformedPayload(RawResponse),
    Fail(&'static str),
}

/// Records every request it is given and answers with a fixed [`Reply`].
#[derive(Clone)]
pub(crate) struct FakeTransport {
    reply: Reply,
    seen: Arc<Mutex<Vec<SignedRequest>>>,
}

impl FakeTransport {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn seen(&self) -> Vec<SignedRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: SignedRequest) -> Result<RawResponse, TransportFailure> {
        self.seen.lock().unwrap().push(request);
        match &self.reply {
            Reply::Ok(resp) => Ok(resp.clone()),
            Reply::Status(resp) => Err(TransportFailure::Status(resp.clone())),
            Reply::MalformedPayload(resp) => Err(TransportFailure::MalformedPayload(resp.clone())),
            Reply::Fail(message) => Err(TransportFailure::request(
                *message,
                Some(Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            )),
        }
    }
}

pub(crate) fn ok(body: &str) -> RawResponse {
    RawResponse::new(StatusCode::OK, Vec::new(), body.to_string())
}

pub(crate) fn spaces_account() -> Account {
    Account::new(
        "Test",
        Credentials::new("A".repeat(20), "B".repeat(40)).unwrap(),
    )
    .with_region("nyc3")
    .with_provider(Provider::DigitalOcean)
    .with_buckets(["b1"])
}

pub(crate) const TWO_KEYS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Name>b1</Name>
  <Prefix></Prefix>
  <Marker></Marker>
  <MaxKeys>100</MaxKeys>
  <IsTruncated>false</IsTruncated>
  <Contents>
    <Key>index.html</Key>
    <LastModified>2017-06-01T10:00:00.000Z</LastModified>
    <ETag>"7e2a4bd6bd36e0a3b4a0b5a8f2c06f59"</ETag>
    <Size>1024</Size>
    <StorageClass>STANDARD</StorageClass>
    <Owner><ID>6174283</ID><DisplayName>6174283</DisplayName></Owner>
  </Contents>
  <Contents>
    <Key>logo.png</Key>
    <LastModified>2017-06-02T10:00:00.000Z</LastModified>
    <ETag>"d41d8cd98f00b204e9800998ecf8427e"</ETag>
    <Owner><ID>6174283</ID><DisplayName>6174283</DisplayName></Owner>
    <Size>"2048"</Size>
    <StorageClass>STANDARD</StorageClass>
  </Contents>
</ListBucketResult>"#;

pub(crate) struct TestConfig {
    pub(crate) account: Account,
    pub(crate) bucket: String,
}

/// Live settings from `S3_TEST_*`; `None` skips the live tests.
pub(crate) fn load_config() -> Result<Option<TestConfig>, Error> {
    let Ok(bucket) = env::var("S3_TEST_BUCKET") else {
        return Ok(None);
    };

    let Ok(account) = Account::from_env("live") else {
        return Ok(None);
    };

    let account = match env::var("S3_TEST_REGION") {
        Ok(region) => account.with_region(region),
        Err(_) => account,
    };
    let account = if env::var("S3_TEST_SPACES").is_ok_and(|v| v == "1" || v == "true") {
        account.with_provider(Provider::DigitalOcean)
    } else {
        account
    };

    Ok(Some(TestConfig { account, bucket }))
}

pub(crate) fn unique_key(prefix: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{prefix}{now}")
}
