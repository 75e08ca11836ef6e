//! Channel reads with a channel read key

use crate::codec::timestamp;
use crate::config::Config;
use crate::error::Result;
use crate::executor::{RequestExecutor, RequestIntent, channel_path};
use crate::query::Query;
use crate::types::{ChannelAccess, ChannelInfo, Data, secret_from};
use ambidata_transport::CancellationToken;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

/// Reads one channel.
///
/// The read key is sent as the `readKey` query parameter and is stripped
/// from every error and log line.
#[derive(Debug, Clone)]
pub struct Fetcher {
    ch: String,
    read_key: SecretString,
    config: Config,
}

impl Fetcher {
    /// Create a fetcher for channel `ch` using the default configuration.
    pub fn new(ch: impl Into<String>, read_key: impl Into<String>) -> Self {
        Self {
            ch: ch.into(),
            read_key: secret_from(read_key.into()),
            config: Config::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Channel id
    pub fn ch(&self) -> &str {
        &self.ch
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Channel details.
    pub async fn get_channel(&self, cancel: &CancellationToken) -> Result<ChannelInfo> {
        let intent = RequestIntent::get(channel_path(&self.ch, "/")?, self.query());
        RequestExecutor::new(&self.config)
            .execute_json(&intent, cancel)
            .await
    }

    /// The `n` most recent data points after skipping the newest `skip`,
    /// newest first.
    ///
    /// `n == 0` returns an empty list without a request.
    pub async fn fetch_range(
        &self,
        n: usize,
        skip: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<Data>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut query = self.query();
        query.set("n", n.to_string());
        if skip > 0 {
            query.set("skip", skip.to_string());
        }
        self.fetch_data(query, cancel).await
    }

    /// Data points created in `start..end`.
    ///
    /// An empty or reversed period returns an empty list without a request.
    pub async fn fetch_period(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Data>> {
        if start >= end {
            return Ok(Vec::new());
        }

        let mut query = self.query();
        query.set("start", timestamp::format(&start));
        query.set("end", timestamp::format(&end));
        self.fetch_data(query, cancel).await
    }

    async fn fetch_data(&self, query: Query, cancel: &CancellationToken) -> Result<Vec<Data>> {
        let intent = RequestIntent::get(channel_path(&self.ch, "/data")?, query);
        let list: Option<Vec<Data>> = RequestExecutor::new(&self.config)
            .execute_json(&intent, cancel)
            .await?;
        Ok(list.unwrap_or_default())
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.set("readKey", self.read_key.expose_secret());
        query
    }
}

impl From<&ChannelAccess> for Fetcher {
    fn from(access: &ChannelAccess) -> Self {
        Self::new(access.info.ch.clone(), access.read_key.expose_secret())
    }
}
