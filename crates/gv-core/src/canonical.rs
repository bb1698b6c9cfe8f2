//! # Canonical Serialization: JCS Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that feed a portfolio commitment digest.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which rejects floating
//! point numbers and then serializes with RFC 8785 (JSON Canonicalization
//! Scheme) rules: sorted object keys, compact separators, UTF-8 output.
//!
//! The issuer hashes a snapshot at attestation time and a verifier recomputes
//! the hash later, possibly in another process. Both sides must produce the
//! same bytes.
//!
//! ## Coercion Rules
//!
//! 1. **Reject floats**: monetary values (NAV estimates) must be integers.
//!    JCS number serialization of non-integers has edge cases across
//!    languages that make them unsafe inside a commitment.
//! 2. **Timestamps**: serialized by [`crate::Timestamp`] as UTC with `Z`
//!    suffix, seconds precision.
//! 3. **Keys**: JSON object keys are strings and are sorted by JCS.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization with float rejection.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - All numbers are integers, never floats.
/// - Serialization uses sorted keys with compact separators (RFC 8785).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains a
    /// float. Returns `CanonicalizationError::SerializationFailed` if JSON or
    /// JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let bytes = serialize_canonical(&value)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk a JSON value tree and fail on the first non-integer number.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() {
                // serde_json keeps `1.0` as F64, so integral floats are rejected too.
                return Err(CanonicalizationError::FloatRejected(
                    n.as_f64().unwrap_or(f64::NAN),
                ));
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(reject_floats),
        Value::Array(arr) => arr.iter().try_for_each(reject_floats),
    }
}

/// Serialize a JSON value in JCS-canonical form (RFC 8785).
fn serialize_canonical(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let s = serde_jcs::to_string(value)?;
    Ok(s.into_bytes())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// JSON values without floats.
    fn json_value_no_floats() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ -]{0,24}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|m| {
                    Value::Object(m.into_iter().collect())
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_bytes_deterministic(value in json_value_no_floats()) {
            let a = CanonicalBytes::new(&value).unwrap();
            let b = CanonicalBytes::new(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        #[test]
        fn canonical_bytes_reparse_to_same_value(value in json_value_no_floats()) {
            let cb = CanonicalBytes::new(&value).unwrap();
            let parsed: Value = serde_json::from_slice(cb.as_bytes()).unwrap();
            prop_assert_eq!(parsed, value);
        }

        #[test]
        fn fractional_floats_always_rejected(f in any::<f64>().prop_filter("fractional", |f| {
            f.is_finite() && f.fract() != 0.0
        })) {
            let data = serde_json::json!({"val": f});
            prop_assert!(CanonicalBytes::new(&data).is_err());
        }
    }
}
