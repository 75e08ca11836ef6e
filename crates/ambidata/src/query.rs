//! Query parameters and credential redaction
//!
//! The service authenticates reads and account operations through query
//! parameters, so every query that ends up in an error or a log line must
//! first pass through [`Query::sanitized`].

use std::collections::BTreeMap;
use std::fmt;

/// Query keys that carry credentials and are never reported.
pub const CREDENTIAL_KEYS: [&str; 3] = ["userKey", "readKey", "writeKey"];

/// Multi-valued query parameters.
///
/// Keys are kept sorted so the encoded form is stable.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, Vec<String>>);

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values of `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// Append `value` to the values of `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// First value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values of `key`.
    pub fn values(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `key` is present at all.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no keys are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over keys and their value lists in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `application/x-www-form-urlencoded` form, sorted by key.
    pub fn encode(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                ser.append_pair(key, value);
            }
        }
        ser.finish()
    }

    /// Copy of this query without [`CREDENTIAL_KEYS`].
    ///
    /// Matching is exact and case-sensitive; every other key keeps its full
    /// value list.
    pub fn sanitized(&self) -> Query {
        Query(
            self.0
                .iter()
                .filter(|(k, _)| !CREDENTIAL_KEYS.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

// Debug output is redacted so a stray `{:?}` cannot leak a key.
impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, values) in &self.0 {
            if CREDENTIAL_KEYS.contains(&key.as_str()) {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, values);
            }
        }
        map.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (k, v) in iter {
            query.add(k, v);
        }
        query
    }
}
