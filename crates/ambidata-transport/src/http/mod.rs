//! HTTP transport implementation
//!
//! Provides the default reqwest-backed client that implements the Transport
//! trait. Requests are sent once; there is no retry or rate limiting.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
