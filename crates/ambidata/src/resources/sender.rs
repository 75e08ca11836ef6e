//! Data upload with a channel write key

use crate::config::Config;
use crate::error::Result;
use crate::executor::{RequestExecutor, RequestIntent, channel_path};
use crate::types::{ChannelAccess, ChannelAccessLv1, Data, secret_from};
use crate::wire::{SendCmnt, SendData, SendDataListRequest, SendDataRequest, SendHide};
use ambidata_transport::CancellationToken;
use chrono::{DateTime, Utc};
use http::Method;
use secrecy::{ExposeSecret, SecretString};

/// Writes data to one channel.
///
/// The write key travels in the JSON body and never appears in an error or
/// log line. Every write checks the response for the service's
/// "request entity too large" rejection.
///
/// # Example
///
/// ```rust,no_run
/// # use ambidata::{CancellationToken, Data, Maybe, Sender};
/// # async fn example() -> ambidata::Result<()> {
/// let sender = Sender::new("83601", "52e2cd7ddbfe2fed");
/// let data = Data {
///     d1: Maybe::just(23.5),
///     ..Default::default()
/// };
/// sender.send(&data, &CancellationToken::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Sender {
    ch: String,
    write_key: SecretString,
    config: Config,
}

impl Sender {
    /// Create a sender for channel `ch` using the default configuration.
    pub fn new(ch: impl Into<String>, write_key: impl Into<String>) -> Self {
        Self {
            ch: ch.into(),
            write_key: secret_from(write_key.into()),
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

    /// Send one data point.
    ///
    /// Absent values are left out of the request. `data.hide` is ignored;
    /// use [`Sender::set_hide`] to change it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`](crate::Error::Encode) without sending anything
    /// if a value is NaN or infinite.
    pub async fn send(&self, data: &Data, cancel: &CancellationToken) -> Result<()> {
        let body = SendDataRequest {
            data: SendData::from(data),
            write_key: self.write_key.expose_secret(),
        };
        let path = channel_path(&self.ch, "/data")?;
        let intent = RequestIntent::json(Method::POST, path, &body)?;
        RequestExecutor::new(&self.config)
            .execute_write(&intent, cancel)
            .await
    }

    /// Send several data points in one request.
    ///
    /// An empty slice sends nothing.
    pub async fn send_bulk(&self, data: &[Data], cancel: &CancellationToken) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }

        let body = SendDataListRequest {
            write_key: self.write_key.expose_secret(),
            data: data.iter().map(SendData::from).collect(),
        };
        let path = channel_path(&self.ch, "/dataarray")?;
        let intent = RequestIntent::json(Method::POST, path, &body)?;
        RequestExecutor::new(&self.config)
            .execute_write(&intent, cancel)
            .await
    }

    /// Set the comment of the data point created at `created`.
    pub async fn set_cmnt(
        &self,
        created: DateTime<Utc>,
        cmnt: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let body = SendCmnt {
            write_key: self.write_key.expose_secret(),
            created,
            cmnt,
        };
        self.put(&body, cancel).await
    }

    /// Hide or show the data point created at `created`.
    pub async fn set_hide(
        &self,
        created: DateTime<Utc>,
        hide: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let body = SendHide {
            write_key: self.write_key.expose_secret(),
            created,
            hide,
        };
        self.put(&body, cancel).await
    }

    async fn put<T: serde::Serialize>(&self, body: &T, cancel: &CancellationToken) -> Result<()> {
        let path = channel_path(&self.ch, "/data")?;
        let intent = RequestIntent::json(Method::PUT, path, body)?;
        RequestExecutor::new(&self.config)
            .execute_write(&intent, cancel)
            .await
    }
}

impl From<&ChannelAccess> for Sender {
    fn from(access: &ChannelAccess) -> Self {
        Self::new(access.info.ch.clone(), access.write_key.expose_secret())
    }
}

impl From<&ChannelAccessLv1> for Sender {
    fn from(access: &ChannelAccessLv1) -> Self {
        Self::new(access.ch.clone(), access.write_key.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_write_key() {
        let sender = Sender::new("83601", "52e2cd7ddbfe2fed");
        assert!(!format!("{sender:?}").contains("52e2cd7ddbfe2fed"));
        assert_eq!(sender.ch(), "83601");
    }

    #[test]
    fn test_from_channel_access_lv1() {
        let access: ChannelAccessLv1 =
            serde_json::from_str(r#"{"ch":"83601","writeKey":"575d743ebb4d2c2d"}"#).unwrap();
        let sender = Sender::from(&access);
        assert_eq!(sender.ch(), "83601");
        assert_eq!(sender.write_key.expose_secret(), "575d743ebb4d2c2d");
    }

    #[tokio::test]
    async fn test_send_bulk_empty_is_noop() {
        // Unroutable host: any request would fail.
        let config = Config::builder().scheme("http").host("invalid.invalid").build();
        let sender = Sender::new("1", "k").with_config(config);
        sender.send_bulk(&[], &CancellationToken::new()).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_channel_is_rejected() {
        let config = Config::builder().scheme("http").host("invalid.invalid").build();
        let sender = Sender::new("", "k").with_config(config);
        let err = sender
            .send(&Data::default(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidArgument(_)));
    }
}
