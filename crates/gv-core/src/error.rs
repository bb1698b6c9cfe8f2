//! # Error Types
//!
//! Errors raised by the foundational types. All use `thiserror` for
//! derive-based `Display` and `Error` implementations. Higher crates wrap
//! these in their own taxonomies rather than flattening them to strings.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations; use an integer amount: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// A hex digest string did not have the canonical shape.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DigestError {
    /// Wrong number of hex characters.
    #[error("digest must be {expected} hex characters, got {actual}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },

    /// A character outside `[0-9a-f]`.
    #[error("digest contains non-lowercase-hex character {0:?}")]
    InvalidCharacter(char),
}

/// An identifier failed validation at construction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdentifierError {
    /// Identifier was empty or whitespace-only.
    #[error("{kind} must not be empty")]
    Empty {
        /// The identifier type.
        kind: &'static str,
    },

    /// Identifier contained whitespace or control characters.
    #[error("{kind} contains invalid character in {value:?}")]
    InvalidCharacter {
        /// The identifier type.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

/// A timestamp string could not be accepted.
#[derive(Error, Debug)]
pub enum TimestampError {
    /// Not UTC with a `Z` suffix.
    #[error("timestamp must use Z suffix (UTC only), got: {0:?}")]
    NotUtc(String),

    /// Not RFC 3339.
    #[error("invalid RFC 3339 timestamp {input:?}: {source}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// Parser error.
        source: chrono::ParseError,
    },

    /// Valid RFC 3339, but not the exact `YYYY-MM-DDTHH:MM:SSZ` rendering.
    #[error("timestamp {input:?} is not canonical; expected the form {canonical:?}")]
    NotCanonical {
        /// The rejected input.
        input: String,
        /// The same instant, truncated to seconds, in canonical form.
        canonical: String,
    },

    /// Unix seconds outside chrono's representable range.
    #[error("invalid Unix timestamp: {0}")]
    OutOfRange(i64),
}
