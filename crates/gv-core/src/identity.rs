//! # Domain Identity Newtypes
//!
//! Newtype wrappers for GlassVault identifiers. You cannot pass a `LoanId`
//! where a `ProofId` is expected.
//!
//! Identifiers are short human-readable strings (`healthy-1`, `L-0001`,
//! `GV-3F9A0C`) rather than UUIDs, because they are read aloud and pasted
//! between counterparties during verification.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::IdentifierError;

/// Marker embedded in proof ids minted without a reachable ledger.
pub const OFFLINE_MARKER: &str = "OFFLINE";

fn validate(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
    if value.trim().is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(IdentifierError::InvalidCharacter {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Construct a validated identifier.
            pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
                let value = value.into();
                validate($kind, &value)?;
                Ok(Self(value))
            }

            /// Access the inner string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::new(s).map_err(serde::de::Error::custom)
            }
        }
    };
}

string_id!(
    /// Identifier of an ingested portfolio (e.g. `healthy-1`).
    PortfolioId,
    "portfolio id"
);

string_id!(
    /// Identifier of a loan within a portfolio (e.g. `L-0001`).
    LoanId,
    "loan id"
);

string_id!(
    /// Identifier of an issued proof.
    ///
    /// Ledger-registered ids look like `GV-3F9A0C`; locally minted ids carry
    /// the offline marker, `GV-OFFLINE-0042`.
    ProofId,
    "proof id"
);

impl ProofId {
    /// Whether this id was minted locally while the ledger was unreachable.
    pub fn is_offline(&self) -> bool {
        self.0.split('-').any(|segment| segment == OFFLINE_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ids_construct() {
        assert_eq!(PortfolioId::new("healthy-1").unwrap().as_str(), "healthy-1");
        assert_eq!(LoanId::new("L-0001").unwrap().to_string(), "L-0001");
    }

    #[test]
    fn empty_id_rejected() {
        assert_eq!(
            PortfolioId::new("  "),
            Err(IdentifierError::Empty { kind: "portfolio id" })
        );
    }

    #[test]
    fn whitespace_inside_id_rejected() {
        assert!(matches!(
            ProofId::new("GV 123"),
            Err(IdentifierError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn offline_marker_detected() {
        assert!(ProofId::new("GV-OFFLINE-0042").unwrap().is_offline());
        assert!(!ProofId::new("GV-3F9A0C").unwrap().is_offline());
        // The marker must be a whole segment.
        assert!(!ProofId::new("GV-OFFLINEX").unwrap().is_offline());
    }

    #[test]
    fn serde_is_transparent_and_validating() {
        let id = LoanId::new("L-0101").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"L-0101\"");
        let back: LoanId = serde_json::from_str("\"L-0101\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<LoanId>("\"\"").is_err());
    }

    #[test]
    fn from_str_parses() {
        let id: ProofId = "GV-ABCDEF".parse().unwrap();
        assert_eq!(id.as_str(), "GV-ABCDEF");
    }
}
