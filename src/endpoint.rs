//! Service endpoint resolution for Amazon S3 and DigitalOcean Spaces.

use url::Url;

use crate::{
    account::Account,
    auth::Region,
    error::{Error, Result},
};

const ENDPOINT_PREFIX: &str = "s3";
const API_VERSION: &str = "2006-03-01";
const AMAZON_GLOBAL_REGION: &str = "us-east-1";
const SPACES_DEFAULT_REGION: &str = "nyc3";

/// Which S3-compatible service an account talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Amazon S3.
    #[default]
    Amazon,
    /// DigitalOcean Spaces.
    DigitalOcean,
}

/// Host and signing region a [`Provider`] picks for an account region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderHost {
    pub host: String,
    pub signing_region: Region,
}

impl Provider {
    /// Resolves the host and signing region for an optional account region.
    ///
    /// Amazon accounts without a region use the global endpoint and sign for
    /// `us-east-1`; any explicit region gets its regional endpoint.
    pub fn resolve(self, region: Option<&str>) -> ProviderHost {
        let region = region.map(str::trim).filter(|r| !r.is_empty());
        let (host, signing_region) = match self {
            Self::Amazon => match region {
                None => ("s3.amazonaws.com".to_string(), AMAZON_GLOBAL_REGION),
                Some(region) => {
                    let suffix = if region.starts_with("cn-") {
                        "amazonaws.com.cn"
                    } else {
                        "amazonaws.com"
                    };
                    (format!("s3.{region}.{suffix}"), region)
                }
            },
            Self::DigitalOcean => {
                let region = region.unwrap_or(SPACES_DEFAULT_REGION);
                (format!("{region}.digitaloceanspaces.com"), region)
            }
        };
        ProviderHost {
            host,
            // Blank regions were replaced by a default above.
            signing_region: Region::from_resolved(signing_region.to_string()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amazon => "amazon",
            Self::DigitalOcean => "digitalocean",
        }
    }
}

/// Wire protocol spoken by the endpoint.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// REST requests answered with XML bodies.
    RestXml,
}

/// Request signing scheme.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SigningScheme {
    /// AWS Signature Version 4 with `x-amz-content-sha256`.
    SigV4,
}

/// How the bucket name is placed in the request URL.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingStyle {
    /// `https://host/{bucket}/{key}`.
    Path,
}

/// Everything needed to address and sign a request for one account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    provider: Provider,
    host: String,
    signing_region: Region,
    protocol: Protocol,
    signing: SigningScheme,
    addressing: AddressingStyle,
}

impl Endpoint {
    /// Derives the endpoint for `account`. Same account, same endpoint.
    pub fn for_account(account: &Account) -> Self {
        let provider = account.provider();
        let ProviderHost {
            host,
            signing_region,
        } = provider.resolve(account.region());
        Self {
            provider,
            host,
            signing_region,
            protocol: Protocol::RestXml,
            signing: SigningScheme::SigV4,
            addressing: AddressingStyle::Path,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn signing_region(&self) -> &Region {
        &self.signing_region
    }

    pub fn endpoint_prefix(&self) -> &'static str {
        ENDPOINT_PREFIX
    }

    pub fn signing_name(&self) -> &'static str {
        ENDPOINT_PREFIX
    }

    pub fn api_version(&self) -> &'static str {
        API_VERSION
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn signing(&self) -> SigningScheme {
        self.signing
    }

    pub fn addressing_style(&self) -> AddressingStyle {
        self.addressing
    }

    /// Returns `https://{host}`.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&format!("https://{}", self.host))
            .map_err(|_| Error::invalid_config(format!("invalid endpoint host `{}`", self.host)))
    }
}
