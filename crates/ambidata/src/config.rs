//! Configuration for the Ambient client

use ambidata_transport::{HttpTransport, HttpTransportConfig, Transport, TransportError};
use std::sync::{Arc, OnceLock};

/// Scheme used when [`Config::scheme`] is empty.
pub const DEFAULT_SCHEME: &str = "https";

/// Host used when [`Config::host`] is empty.
pub const DEFAULT_HOST: &str = "ambidata.io";

/// Connection settings shared by [`Sender`](crate::Sender),
/// [`Fetcher`](crate::Fetcher) and [`Manager`](crate::Manager).
///
/// Every field is optional: an empty string or `None` falls back to the
/// default, so `Config::default()` talks to `https://ambidata.io` through a
/// process-wide pooled HTTP client. A `Config` is cheap to clone and safe to
/// share between concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// URL scheme, `"https"` when empty
    pub scheme: String,

    /// Host and optional port, `"ambidata.io"` when empty
    pub host: String,

    /// Transport used to send requests; the shared default client when `None`
    pub transport: Option<Arc<dyn Transport>>,
}

impl Config {
    /// Create a configuration that uses every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present, then looks for:
    /// - `AMBIDATA_SCHEME` for the URL scheme
    /// - `AMBIDATA_HOST` for the host
    ///
    /// Unset variables keep their defaults.
    #[cfg(feature = "env")]
    pub fn from_env() -> crate::Result<Self> {
        use std::env;

        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(scheme) = env::var("AMBIDATA_SCHEME") {
            config.scheme = scheme;
        }

        if let Ok(host) = env::var("AMBIDATA_HOST") {
            config.host = host;
        }

        Ok(config)
    }

    /// Effective scheme.
    pub fn scheme_or_default(&self) -> &str {
        value_or_default(&self.scheme, DEFAULT_SCHEME)
    }

    /// Effective host.
    pub fn host_or_default(&self) -> &str {
        value_or_default(&self.host, DEFAULT_HOST)
    }

    /// Effective transport.
    ///
    /// Fails only if the shared default client cannot be built.
    pub fn transport_or_default(&self) -> Result<Arc<dyn Transport>, TransportError> {
        match &self.transport {
            Some(t) => Ok(Arc::clone(t)),
            None => shared_transport(),
        }
    }
}

fn value_or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

/// The process-wide default transport, built on first use.
fn shared_transport() -> Result<Arc<dyn Transport>, TransportError> {
    static SHARED: OnceLock<Arc<HttpTransport>> = OnceLock::new();

    let transport = match SHARED.get() {
        Some(t) => Arc::clone(t),
        None => {
            let built = Arc::new(HttpTransport::new()?);
            Arc::clone(SHARED.get_or_init(|| built))
        }
    };
    let transport: Arc<dyn Transport> = transport;
    Ok(transport)
}

/// Builder for creating [`Config`] with a fluent API.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.config.scheme = scheme.into();
        self
    }

    /// Set the host, optionally with a port.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Use a caller-supplied transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    /// Use a dedicated HTTP client with its own settings instead of the
    /// shared default.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn http(mut self, http: HttpTransportConfig) -> crate::Result<Self> {
        let transport = HttpTransport::with_config(http)?;
        self.config.transport = Some(Arc::new(transport));
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> Config {
        self.config
    }
}
