//! API resource endpoints
//!
//! Each façade owns one credential and the [`Config`](crate::Config) used
//! to reach the service:
//!
//! - [`Sender`] writes data with a channel's write key
//! - [`Fetcher`] reads a channel with its read key
//! - [`Manager`] manages the channels of an account with its user key

pub mod fetcher;
pub mod manager;
pub mod sender;

pub use fetcher::Fetcher;
pub use manager::Manager;
pub use sender::Sender;
