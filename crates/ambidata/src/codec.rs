//! Wire codec for optional values
//!
//! The service distinguishes "field omitted" from "field equals zero" for
//! every numeric and location field, so those fields are carried as
//! [`Maybe<T>`] rather than bare numbers. Encoding skips absent values
//! entirely; decoding marks a value present whenever the key was there and
//! decoded cleanly. A JSON `null` decodes cleanly, to the zero value.
//!
//! Struct fields opt in with:
//!
//! ```ignore
//! #[serde(default, skip_serializing_if = "Maybe::is_absent")]
//! d1: Maybe<f64>,
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A value paired with a presence flag.
///
/// When absent, the held value is always `T::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Maybe<T> {
    value: T,
    present: bool,
}

impl<T> Maybe<T> {
    /// A present value.
    pub fn just(value: T) -> Self {
        Self {
            value,
            present: true,
        }
    }

    /// Whether a value is present.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Whether the value is absent. Used as a `skip_serializing_if` predicate.
    pub fn is_absent(&self) -> bool {
        !self.present
    }

    /// The value, if present.
    pub fn get(&self) -> Option<&T> {
        self.present.then_some(&self.value)
    }

    /// The held value; the default of `T` when absent.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Convert into a standard `Option`.
    pub fn into_option(self) -> Option<T> {
        self.present.then_some(self.value)
    }
}

impl<T: Default> Maybe<T> {
    /// An absent value.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Map a present value, keeping absence.
    pub fn map<U: Default>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self.into_option() {
            Some(v) => Maybe::just(f(v)),
            None => Maybe::absent(),
        }
    }
}

impl<T: Default> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Maybe::just(v),
            None => Maybe::absent(),
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        value.into_option()
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Absent values are skipped by the enclosing struct.
        if self.present {
            self.value.serialize(serializer)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de, T> Deserialize<'de> for Maybe<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A present `null` is a successful decode of the zero value.
        let value = Option::<T>::deserialize(deserializer)?;
        Ok(Maybe::just(value.unwrap_or_default()))
    }
}

/// Reject NaN and infinities, which have no JSON representation.
pub(crate) fn finite<S: Serializer>(value: &Maybe<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value.get() {
        Some(v) if !v.is_finite() => Err(serde::ser::Error::custom(format!(
            "json: unsupported value: {v}"
        ))),
        _ => value.serialize(serializer),
    }
}

/// Timestamp encoding.
///
/// Encodes as RFC 3339 in UTC with as many fractional digits as needed.
/// Decoding treats the Unix epoch as "no timestamp", which is how the
/// service reports a channel that never received data.
pub mod timestamp {
    use super::*;

    /// Format a timestamp the way the service expects it.
    pub fn format(t: &DateTime<Utc>) -> String {
        t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Serialize a required timestamp.
    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(t))
    }

    /// Serialize an optional timestamp; pair with
    /// `skip_serializing_if = "Option::is_none"`.
    pub fn serialize_option<S: Serializer>(
        t: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => serialize(t, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional timestamp, folding the epoch into `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let t = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(t.filter(|t| t.timestamp() != 0 || t.timestamp_subsec_nanos() != 0))
    }
}

/// Location decoding.
///
/// The service returns a location as a `[lng, lat]` pair. On the way out it
/// is split into separate `lat` and `lng` fields by the request types.
pub mod location {
    use super::*;
    use crate::types::Location;
    use serde::de::{Error, IgnoredAny, SeqAccess, Visitor};

    /// Deserialize a `[lng, lat]` pair into a present location.
    ///
    /// Missing slots read as zero and extra elements are ignored, as is a
    /// `null` in either slot. A `null` location is the origin.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Maybe<Location>, D::Error> {
        deserializer.deserialize_option(PairVisitor)
    }

    struct PairVisitor;

    impl<'de> Visitor<'de> for PairVisitor {
        type Value = Maybe<Location>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a [lng, lat] array")
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(Maybe::just(Location::default()))
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            self.visit_none()
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_seq(self)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let lng = seq.next_element::<Option<f64>>()?.flatten().unwrap_or_default();
            let lat = seq.next_element::<Option<f64>>()?.flatten().unwrap_or_default();
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Maybe::just(Location { lat, lng }))
        }
    }

    /// Split a location into its `lat` and `lng` wire fields, both sharing
    /// the location's presence.
    pub fn split(loc: &Maybe<Location>) -> (Maybe<f64>, Maybe<f64>) {
        (loc.map(|l| l.lat), loc.map(|l| l.lng))
    }
}
