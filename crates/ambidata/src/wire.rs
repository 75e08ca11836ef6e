//! Request bodies for the write endpoints

use crate::codec::{self, Maybe};
use crate::types::Data;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One data point as sent. `hide` has no counterpart here; it can only be
/// changed afterwards through [`SendHide`].
#[derive(Debug, Serialize)]
pub(crate) struct SendData<'a> {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "codec::timestamp::serialize_option"
    )]
    created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    d1: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    d2: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    d3: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    d4: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    d5: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    d6: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    d7: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    d8: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    lat: Maybe<f64>,
    #[serde(skip_serializing_if = "Maybe::is_absent", serialize_with = "codec::finite")]
    lng: Maybe<f64>,
    #[serde(skip_serializing_if = "str::is_empty")]
    cmnt: &'a str,
}

impl<'a> From<&'a Data> for SendData<'a> {
    fn from(data: &'a Data) -> Self {
        let (lat, lng) = codec::location::split(&data.loc);
        Self {
            created: data.created,
            d1: data.d1,
            d2: data.d2,
            d3: data.d3,
            d4: data.d4,
            d5: data.d5,
            d6: data.d6,
            d7: data.d7,
            d8: data.d8,
            lat,
            lng,
            cmnt: &data.cmnt,
        }
    }
}

/// Body of `POST /api/v2/channels/{ch}/data`.
#[derive(Debug, Serialize)]
pub(crate) struct SendDataRequest<'a> {
    #[serde(flatten)]
    pub data: SendData<'a>,
    #[serde(rename = "writeKey")]
    pub write_key: &'a str,
}

/// Body of `POST /api/v2/channels/{ch}/dataarray`.
#[derive(Debug, Serialize)]
pub(crate) struct SendDataListRequest<'a> {
    #[serde(rename = "writeKey")]
    pub write_key: &'a str,
    pub data: Vec<SendData<'a>>,
}

/// Body of `PUT /api/v2/channels/{ch}/data` that sets a comment.
#[derive(Debug, Serialize)]
pub(crate) struct SendCmnt<'a> {
    #[serde(rename = "writeKey")]
    pub write_key: &'a str,
    #[serde(serialize_with = "codec::timestamp::serialize")]
    pub created: DateTime<Utc>,
    pub cmnt: &'a str,
}

/// Body of `PUT /api/v2/channels/{ch}/data` that sets the hidden flag.
#[derive(Debug, Serialize)]
pub(crate) struct SendHide<'a> {
    #[serde(rename = "writeKey")]
    pub write_key: &'a str,
    #[serde(serialize_with = "codec::timestamp::serialize")]
    pub created: DateTime<Utc>,
    pub hide: bool,
}
