//! # Content Digest: SHA-256 over Canonical Bytes
//!
//! Defines `DataHash`, the 64-character lowercase hex form of a SHA-256
//! digest stored in a proof record.
//!
//! ## Security Invariant
//!
//! A `DataHash` is either computed from `CanonicalBytes` or parsed from a
//! strictly validated hex string, so every freshly computed hash comes out of
//! the same canonicalization pipeline. This is enforced by the signature of
//! `sha256_digest()`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::DigestError;

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// Compute the SHA-256 data hash of canonical bytes.
///
/// # Security Invariant
///
/// Accepts only `&CanonicalBytes`, not raw `&[u8]`.
pub fn sha256_digest(data: &CanonicalBytes) -> DataHash {
    let digest = Sha256::digest(data.as_bytes());
    DataHash(digest.iter().map(|b| format!("{b:02x}")).collect())
}

/// A SHA-256 data hash in its wire form: exactly 64 lowercase hex characters.
///
/// This is the `dataHash` field of a proof record. Comparison is plain string
/// equality, which for this normalized form is byte-for-byte digest equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataHash(String);

impl DataHash {
    /// Parse a data hash, rejecting anything but 64 lowercase hex characters.
    ///
    /// Uppercase hex is rejected rather than normalized: a stored hash that
    /// was not produced by [`sha256_digest()`] is suspect.
    pub fn parse(s: &str) -> Result<Self, DigestError> {
        if s.len() != SHA256_HEX_LEN {
            return Err(DigestError::InvalidLength {
                expected: SHA256_HEX_LEN,
                actual: s.len(),
            });
        }
        if let Some(c) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(DigestError::InvalidCharacter(c));
        }
        Ok(Self(s.to_string()))
    }

    /// The hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `n` hex characters, for log lines and terminal output.
    pub fn short(&self, n: usize) -> &str {
        &self.0[..n.min(self.0.len())]
    }
}

impl std::fmt::Display for DataHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DataHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DataHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
