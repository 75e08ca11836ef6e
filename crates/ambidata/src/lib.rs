//! # ambidata
//!
//! Rust client for the Ambient IoT data service (`ambidata.io`):
//! - Sending data points, singly or in bulk, with a channel write key
//! - Reading channel details and data with a channel read key
//! - Listing and managing the channels of an account with a user key
//! - Presence-aware values: "absent" and "zero" stay distinct on the wire
//! - Credentials stripped from every error and log line
//!
//! Every call takes a [`CancellationToken`]; cancelling it aborts the
//! exchange and the call returns an error for which
//! [`Error::is_canceled`] is true. The client never retries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ambidata::{CancellationToken, Data, Fetcher, Maybe, Sender};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cancel = CancellationToken::new();
//!
//!     let sender = Sender::new("83601", "52e2cd7ddbfe2fed");
//!     sender
//!         .send(
//!             &Data {
//!                 d1: Maybe::just(21.5),
//!                 d2: Maybe::just(48.0),
//!                 ..Default::default()
//!             },
//!             &cancel,
//!         )
//!         .await?;
//!
//!     let fetcher = Fetcher::new("83601", "74545caba2bfd44f");
//!     for data in fetcher.fetch_range(10, 0, &cancel).await? {
//!         println!("{:?} d1={:?}", data.created, data.d1.get());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use codec::Maybe;
pub use config::{Config, ConfigBuilder, DEFAULT_HOST, DEFAULT_SCHEME};
pub use error::{ApiError, ApiErrorKind, Error, Result, StatusCodeError};
pub use palette::{Rgba, StateColor};
pub use query::Query;
pub use resources::{Fetcher, Manager, Sender};
pub use types::{
    ChannelAccess, ChannelAccessLv1, ChannelInfo, Color, Data, FieldInfo, LastData, Location,
};

pub use ambidata_transport::{
    CancellationToken, HttpTransport, HttpTransportConfig, Transport, TransportError,
};

// Module declarations
pub mod classify;
pub mod codec;
pub mod config;
pub mod error;
pub mod executor;
pub mod observability;
pub mod palette;
pub mod query;
pub mod resources;
pub mod types;
mod wire;

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod property_tests;
