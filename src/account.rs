//! Accounts: credentials plus the endpoint metadata needed to reach them.

use std::fmt;

use serde::Deserialize;

use crate::{
    auth::Credentials,
    endpoint::Provider,
    error::{Error, Result},
};

/// A named set of credentials for one S3-compatible service.
///
/// Accounts are immutable once built. Secrets are only ever read by the
/// signer; the `Debug` output redacts them.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    region: Option<String>,
    provider: Provider,
    credentials: Credentials,
    buckets: Vec<String>,
}

impl Account {
    /// Creates an Amazon account with no region and no buckets.
    pub fn new(name: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            name: name.into(),
            region: None,
            provider: Provider::Amazon,
            credentials,
            buckets: Vec::new(),
        }
    }

    /// Builds an Amazon account from `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
    /// and, when set, `AWS_REGION`.
    pub fn from_env(name: impl Into<String>) -> Result<Self> {
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID")
            .map_err(|_| Error::invalid_config("missing AWS_ACCESS_KEY_ID"))?;
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY")
            .map_err(|_| Error::invalid_config("missing AWS_SECRET_ACCESS_KEY"))?;

        let mut account = Self::new(name, Credentials::new(access_key_id, secret_access_key)?);
        if let Ok(region) = std::env::var("AWS_REGION")
            && !region.trim().is_empty()
        {
            account = account.with_region(region);
        }
        Ok(account)
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_buckets<I, S>(mut self, buckets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buckets = buckets.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn is_digital_ocean(&self) -> bool {
        self.provider == Provider::DigitalOcean
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn buckets(&self) -> &[String] {
        &self.buckets
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("provider", &self.provider)
            .field("credentials", &self.credentials)
            .field("buckets", &self.buckets)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct AccountRecord {
    name: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    is_digital_ocean: bool,
    access_key: String,
    secret_key: String,
    buckets: Vec<String>,
}

impl From<AccountRecord> for Account {
    fn from(value: AccountRecord) -> Self {
        let provider = if value.is_digital_ocean {
            Provider::DigitalOcean
        } else {
            Provider::Amazon
        };

        Self {
            name: value.name,
            region: value.region,
            provider,
            credentials: Credentials::unchecked(value.access_key, value.secret_key),
            buckets: value.buckets,
        }
    }
}

/// Decodes an account file: a JSON array of account objects, in document order.
///
/// ```json
/// [{"name": "Spaces", "region": "nyc3", "is-digital-ocean": true,
///   "access-key": "...", "secret-key": "...", "buckets": ["b1"]}]
/// ```
pub fn decode_accounts(json: &str) -> Result<Vec<Account>> {
    let mut de = serde_json::Deserializer::from_str(json);
    let records: Vec<AccountRecord> = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| Error::decode(Some(e.path().to_string()), e.inner().to_string()))?;
    de.end().map_err(|e| Error::decode(None, e.to_string()))?;

    Ok(records.into_iter().map(Account::from).collect())
}

/// Returns the first account named exactly `name`.
pub fn find_account<'a>(accounts: &'a [Account], name: &str) -> Option<&'a Account> {
    accounts.iter().find(|a| a.name == name)
}
