//! Common test utilities and helpers

#![allow(dead_code)]

use ambidata::{Config, HttpTransportConfig};
use std::path::Path;
use wiremock::MockServer;

pub const CH: &str = "83601";
pub const READ_KEY: &str = "74545caba2bfd44f";
pub const WRITE_KEY: &str = "52e2cd7ddbfe2fed";
pub const USER_KEY: &str = "4ef42dcecf7e7ceba2";
pub const DEV_KEY: &str = "08:A9:0C:9E:E0:C3";

/// Load a response fixture
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Configuration that sends every request to `server`.
///
/// Each call gets its own HTTP client: mock servers are pooled between
/// tests, and a connection kept alive by another test's runtime is unusable.
pub fn mock_config(server: &MockServer) -> Config {
    Config::builder()
        .scheme("http")
        .host(server.address().to_string())
        .http(HttpTransportConfig::default())
        .expect("Failed to build HTTP client")
        .build()
}

/// Configuration pointing at a port nothing listens on
pub fn unreachable_config() -> Config {
    Config::builder().scheme("http").host("127.0.0.1:1").build()
}
