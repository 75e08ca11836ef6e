//! Account-level channel management with a user key

use crate::config::Config;
use crate::error::Result;
use crate::executor::{CHANNELS_PATH, RequestExecutor, RequestIntent, channel_path};
use crate::query::Query;
use crate::types::{ChannelAccess, ChannelAccessLv1, secret_from};
use ambidata_transport::CancellationToken;
use secrecy::{ExposeSecret, SecretString};

/// Manages the channels of one account.
///
/// The user key is sent as the `userKey` query parameter and is stripped
/// from every error and log line.
#[derive(Debug, Clone)]
pub struct Manager {
    user_key: SecretString,
    config: Config,
}

impl Manager {
    /// Create a manager using the default configuration.
    pub fn new(user_key: impl Into<String>) -> Self {
        Self {
            user_key: secret_from(user_key.into()),
            config: Config::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Every channel of the account, with its keys.
    pub async fn get_channel_list(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<ChannelAccess>> {
        let intent = RequestIntent::get(CHANNELS_PATH, self.query());
        let list: Option<Vec<ChannelAccess>> = RequestExecutor::new(&self.config)
            .execute_json(&intent, cancel)
            .await?;
        Ok(list.unwrap_or_default())
    }

    /// The channel bound to device `dev_key`.
    pub async fn get_device_channel(
        &self,
        dev_key: &str,
        cancel: &CancellationToken,
    ) -> Result<ChannelAccess> {
        let mut query = self.query();
        query.set("devKey", dev_key);
        let intent = RequestIntent::get(CHANNELS_PATH, query);
        RequestExecutor::new(&self.config)
            .execute_json(&intent, cancel)
            .await
    }

    /// Channel id and write key of the channel bound to device `dev_key`.
    pub async fn get_device_channel_lv1(
        &self,
        dev_key: &str,
        cancel: &CancellationToken,
    ) -> Result<ChannelAccessLv1> {
        let mut query = self.query();
        query.set("devKey", dev_key);
        query.set("level", "1");
        let intent = RequestIntent::get(CHANNELS_PATH, query);
        RequestExecutor::new(&self.config)
            .execute_json(&intent, cancel)
            .await
    }

    /// Delete every data point of channel `ch`. The channel itself stays.
    pub async fn delete_data(&self, ch: &str, cancel: &CancellationToken) -> Result<()> {
        let intent = RequestIntent::delete(channel_path(ch, "/data")?, self.query());
        RequestExecutor::new(&self.config)
            .execute_write(&intent, cancel)
            .await
    }

    fn query(&self) -> Query {
        let mut query = Query::new();
        query.set("userKey", self.user_key.expose_secret());
        query
    }
}
