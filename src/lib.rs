//! OAuth 1.0a request signing with a small status/timeline client.
//!
//! The signing core ([`RequestBuilder`]) turns an HTTP method, a
//! target URL, a set of request parameters and a [`Credentials`] set
//! into a ready-to-send [`SignedRequest`] carrying an
//! `Authorization: OAuth ...` header. It performs no I/O of its own.
//!
//! The optional [`client`] module (cargo feature `reqwest`, on by
//! default) wraps the core in a blocking HTTP client that posts
//! status updates and fetches timelines.
//!
//! ```no_run
//! use statusign::{Client, Credentials, TimelineQuery};
//!
//! # fn main() -> Result<(), statusign::Error> {
//! let client = Client::new(Credentials::new(
//!     "consumer-key",
//!     "consumer-secret",
//!     "access-token",
//!     "access-secret",
//! ));
//! client.update_status("hello ditto")?;
//! let latest = client.home_timeline(&TimelineQuery::new().count(20))?;
//! println!("{} statuses", latest.len());
//! # Ok(())
//! # }
//! ```

pub mod encode;
pub mod error;
pub mod signer;
pub mod timeline;

mod util;

#[cfg(feature = "reqwest")]
pub mod client;

pub use error::Error;
pub use signer::{Credentials, RequestBuilder, SignedRequest};
pub use timeline::{Tweet, TwitterUser};

#[cfg(feature = "reqwest")]
pub use client::{Client, TimelineQuery};
