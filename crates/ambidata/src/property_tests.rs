//! Property-based tests for ambidata
//!
//! Uses proptest to check the credential redaction and optional-value
//! invariants over generated inputs.

#[cfg(test)]
mod tests {
    use crate::codec::Maybe;
    use crate::error::{ApiError, ApiErrorKind, StatusCodeError};
    use crate::query::{CREDENTIAL_KEYS, Query};
    use http::Method;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    // ===== Strategy Generators =====

    fn arb_key() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("userKey".to_string()),
            Just("readKey".to_string()),
            Just("writeKey".to_string()),
            "[a-zA-Z]{1,10}",
        ]
    }

    fn arb_query() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec((arb_key(), "[ -~]{0,20}"), 0..12)
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(skip_serializing_if = "Maybe::is_absent")]
        d1: Maybe<f64>,
    }

    // ===== Query Properties =====

    proptest! {
        /// Property: sanitized queries carry no credential keys
        /// Invariant: every other key keeps all of its values
        #[test]
        fn prop_sanitized_drops_only_credentials(pairs in arb_query()) {
            let query: Query = pairs.into_iter().collect();
            let sanitized = query.sanitized();

            for key in CREDENTIAL_KEYS {
                prop_assert!(!sanitized.contains_key(key));
            }
            for (key, values) in query.iter() {
                if !CREDENTIAL_KEYS.contains(&key) {
                    prop_assert_eq!(sanitized.values(key), values);
                }
            }
        }

        /// Property: an error message never contains a credential value
        #[test]
        fn prop_error_text_hides_credentials(secret in "[0-9a-f]{16}", code in 100u16..1000) {
            let query: Query = [("readKey", secret.as_str()), ("n", "1")].into_iter().collect();
            let err = ApiError::new(
                Method::GET,
                "/api/v2/channels/1/data",
                &query,
                ApiErrorKind::Status(StatusCodeError::new(code)),
            );
            prop_assert!(!err.to_string().contains(&secret));
        }
    }

    // ===== Codec Properties =====

    proptest! {
        /// Property: a present finite value survives encode then decode
        #[test]
        fn prop_present_value_round_trips(n in any::<i32>(), scale in 0u32..3) {
            let v = f64::from(n) / f64::from(10u32.pow(scale));
            let sample = Sample { d1: Maybe::just(v) };
            let json = serde_json::to_string(&sample).unwrap();
            let back: Sample = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, sample);
        }
    }

    #[test]
    fn absent_value_encodes_as_empty_object() {
        let json = serde_json::to_string(&Sample::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
