//! Pluggable transport layer for the ambidata client
//!
//! Provides the seam between the ambidata request executor and whatever
//! actually moves bytes over the network. The executor only ever talks to the
//! [`Transport`] trait, so callers may supply their own implementation (a
//! proxy-aware client, a recording double in tests) instead of the default
//! reqwest-backed [`HttpTransport`].
//!
//! # Architecture
//!
//! - **Transport trait**: one `send` call per HTTP exchange
//! - **HTTP transport**: default implementation via reqwest
//! - **Response body**: a chunked stream with bounded reads and cooperative
//!   cancellation, so callers can inspect a prefix without buffering the body
//! - **Error handling**: [`TransportError`] keeps cancellation and timeouts
//!   distinguishable from other failures
//!
//! # Usage
//!
//! ```ignore
//! use ambidata_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let url = "https://ambidata.io/api/v2/channels/".parse()?;
//! let request = HttpRequest::new(http::Method::GET, url);
//! let response = transport.send(request).await?;
//! let body = response.body.bytes().await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod body;
pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use body::ResponseBody;
pub use error::{Result, TransportError};
pub use crate::http::{HttpTransport, HttpTransportConfig};
pub use tokio_util::sync::CancellationToken;
pub use traits::{HttpRequest, HttpResponse, Transport};
