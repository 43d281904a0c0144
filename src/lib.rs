//! A small typed client for Amazon S3 and DigitalOcean Spaces.
//!
//! Operations are plain values: an operation builder returns a [`Request`]
//! that pairs an unsigned descriptor with the transform applied to the
//! response, and [`Client::send`] signs it (SigV4) for an [`Account`] and
//! dispatches it.
//!
//! ## Quick start
//!
//! ```no_run
//! # async fn demo() -> Result<(), s3_spaces::Error> {
//! use s3_spaces::{Client, ListQuery, api};
//!
//! let accounts = s3_spaces::decode_accounts(
//!     r#"[{"name":"spaces","region":"nyc3","is-digital-ocean":true,
//!          "access-key":"AKIDEXAMPLE","secret-key":"secret","buckets":["b1"]}]"#,
//! )?;
//! let account = s3_spaces::find_account(&accounts, "spaces").expect("configured");
//!
//! let client = Client::new()?;
//! let listing = client
//!     .send(account, api::list_keys("b1", &[ListQuery::MaxKeys(100)]))
//!     .await?;
//! for key in &listing.keys {
//!     println!("{} ({} bytes)", key.key, key.size);
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(all(
    feature = "rustls",
    feature = "native-tls",
    not(feature = "allow-both-tls")
))]
compile_error!("Enable only one of: rustls, native-tls.");

/// Account records and their JSON form.
pub mod account;
/// Operation builders.
pub mod api;
/// Signing time sources.
pub mod clock;
/// Provider endpoint resolution.
pub mod endpoint;
/// Request descriptors and typed requests.
pub mod request;
/// The HTTP seam.
pub mod transport;
/// Shared request/response types.
pub mod types;

mod auth;
mod client;
mod error;
mod util;

pub use account::{Account, decode_accounts, find_account};
pub use auth::{Credentials, Region};
pub use client::{Client, ClientBuilder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use endpoint::{AddressingStyle, Endpoint, Protocol, Provider, ProviderHost, SigningScheme};
pub use error::{Error, Phase, Result};
pub use request::{Body, CannedAcl, ListQuery, Request, RequestDescriptor, ResponseTransform};
pub use transport::{HttpTransport, Transport, TransportFailure};
pub use util::signing::sign_request;
pub use util::xml::parse_list_bucket_result;
