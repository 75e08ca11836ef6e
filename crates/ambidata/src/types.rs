//! Domain types for channels and data points
//!
//! Response bodies decode straight into these types; request bodies are
//! built from them by the private wire types in [`crate::wire`].

use crate::codec::{self, Maybe};
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;

/// A channel together with its read and write keys, as listed for the
/// owning user.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelAccess {
    /// Channel details
    #[serde(flatten)]
    pub info: ChannelInfo,

    /// Per-channel read key
    #[serde(rename = "readKey", deserialize_with = "secret")]
    pub read_key: SecretString,

    /// Per-channel write key
    #[serde(rename = "writeKey", deserialize_with = "secret")]
    pub write_key: SecretString,
}

impl Default for ChannelAccess {
    fn default() -> Self {
        Self {
            info: ChannelInfo::default(),
            read_key: secret_from(String::new()),
            write_key: secret_from(String::new()),
        }
    }
}

impl ChannelAccess {
    /// Reduce to the channel id and write key.
    pub fn to_lv1(&self) -> ChannelAccessLv1 {
        ChannelAccessLv1 {
            ch: self.info.ch.clone(),
            write_key: self.write_key.clone(),
        }
    }
}

/// Channel id and write key only.
///
/// "Lv1" follows the `level=1` query parameter that selects this shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelAccessLv1 {
    /// Channel id
    pub ch: String,

    /// Per-channel write key
    #[serde(rename = "writeKey", deserialize_with = "secret")]
    pub write_key: SecretString,
}

impl Default for ChannelAccessLv1 {
    fn default() -> Self {
        Self {
            ch: String::new(),
            write_key: secret_from(String::new()),
        }
    }
}

/// Channel details.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChannelInfo {
    /// Channel id
    pub ch: String,
    /// Owning user id
    pub user: String,
    /// Creation time
    #[serde(deserialize_with = "codec::timestamp::deserialize")]
    pub created: Option<DateTime<Utc>>,
    /// Last settings change
    #[serde(deserialize_with = "codec::timestamp::deserialize")]
    pub modified: Option<DateTime<Utc>>,
    /// Last data post; `None` when nothing was ever posted
    #[serde(rename = "lastpost", deserialize_with = "codec::timestamp::deserialize")]
    pub last_post: Option<DateTime<Utc>>,
    /// Number of charts
    pub charts: i64,
    /// Data points received today
    #[serde(rename = "dataperday")]
    pub data_per_day: i64,
    #[allow(missing_docs)]
    #[serde(rename = "d_ch")]
    pub d_ch: bool,
    /// Display name
    #[serde(rename = "chName")]
    pub ch_name: String,
    /// Description
    #[serde(rename = "chDesc")]
    pub ch_desc: String,
    #[allow(missing_docs)]
    pub d1: FieldInfo,
    #[allow(missing_docs)]
    pub d2: FieldInfo,
    #[allow(missing_docs)]
    pub d3: FieldInfo,
    #[allow(missing_docs)]
    pub d4: FieldInfo,
    #[allow(missing_docs)]
    pub d5: FieldInfo,
    #[allow(missing_docs)]
    pub d6: FieldInfo,
    #[allow(missing_docs)]
    pub d7: FieldInfo,
    #[allow(missing_docs)]
    pub d8: FieldInfo,
    /// Fixed channel location
    #[serde(deserialize_with = "codec::location::deserialize")]
    pub loc: Maybe<Location>,
    /// Photo URL
    #[serde(rename = "photoid")]
    pub photo_id: String,
    /// Device keys bound to the channel
    #[serde(rename = "devkeys")]
    pub dev_keys: Vec<String>,
    /// Board id
    pub bd: String,
    /// Most recent data point
    #[serde(rename = "lastdata")]
    pub last_data: LastData,
}

/// Display settings of one data field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldInfo {
    /// Field label
    pub name: String,
    /// Chart color
    pub color: Color,
}

/// Chart color code of a data field.
///
/// The service sends these as numeric strings; unknown codes are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Color(Cow<'static, str>);

impl Color {
    #[allow(missing_docs)]
    pub const BLUE: Color = Color(Cow::Borrowed("1"));
    #[allow(missing_docs)]
    pub const RED: Color = Color(Cow::Borrowed("2"));
    #[allow(missing_docs)]
    pub const ORANGE: Color = Color(Cow::Borrowed("3"));
    #[allow(missing_docs)]
    pub const PURPLE: Color = Color(Cow::Borrowed("4"));
    #[allow(missing_docs)]
    pub const GREEN: Color = Color(Cow::Borrowed("5"));
    #[allow(missing_docs)]
    pub const SKY_BLUE: Color = Color(Cow::Borrowed("6"));
    #[allow(missing_docs)]
    pub const PINK: Color = Color(Cow::Borrowed("7"));
    #[allow(missing_docs)]
    pub const BROWN: Color = Color(Cow::Borrowed("8"));
    #[allow(missing_docs)]
    pub const OLIVE: Color = Color(Cow::Borrowed("9"));
    #[allow(missing_docs)]
    pub const CYAN: Color = Color(Cow::Borrowed("10"));
    #[allow(missing_docs)]
    pub const YELLOW: Color = Color(Cow::Borrowed("11"));
    #[allow(missing_docs)]
    pub const BLACK: Color = Color(Cow::Borrowed("12"));

    /// Wrap a raw color code.
    pub fn new(code: impl Into<String>) -> Self {
        Color(Cow::Owned(code.into()))
    }

    /// The raw color code; empty when the field has no color set.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The latest data point of a channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LastData {
    /// The data point
    #[serde(flatten)]
    pub data: Data,
    /// Server-side record id
    #[serde(rename = "_id")]
    pub id: String,
}

/// One data point.
///
/// `created` left as `None` on send lets the server stamp the current time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Data {
    #[allow(missing_docs)]
    #[serde(deserialize_with = "codec::timestamp::deserialize")]
    pub created: Option<DateTime<Utc>>,
    #[allow(missing_docs)]
    pub d1: Maybe<f64>,
    #[allow(missing_docs)]
    pub d2: Maybe<f64>,
    #[allow(missing_docs)]
    pub d3: Maybe<f64>,
    #[allow(missing_docs)]
    pub d4: Maybe<f64>,
    #[allow(missing_docs)]
    pub d5: Maybe<f64>,
    #[allow(missing_docs)]
    pub d6: Maybe<f64>,
    #[allow(missing_docs)]
    pub d7: Maybe<f64>,
    #[allow(missing_docs)]
    pub d8: Maybe<f64>,
    #[allow(missing_docs)]
    #[serde(deserialize_with = "codec::location::deserialize")]
    pub loc: Maybe<Location>,
    /// Comment
    pub cmnt: String,
    /// Hidden flag; never sent with new data, see `Sender::set_hide`
    pub hide: bool,
}

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Location {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

pub(crate) fn secret_from(s: String) -> SecretString {
    SecretString::new(s.into_boxed_str())
}

fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(secret_from)
}
