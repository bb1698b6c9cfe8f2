//! # gv-core: Foundational Types for GlassVault
//!
//! The leaf crate of the GlassVault workspace. It defines the primitives that
//! every attestation depends on being exactly right: canonical bytes, content
//! digests, identifiers, and timestamps. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`. A portfolio commitment hashed by the issuer and
//!    recomputed by a verifier must go through the same byte pipeline, so
//!    there is exactly one way to produce hashable bytes.
//!
//! 2. **`sha256_digest()` accepts only `&CanonicalBytes`.** Raw byte slices
//!    cannot be digested by accident.
//!
//! 3. **Newtype identifiers.** `PortfolioId`, `LoanId`, `ProofId` are distinct
//!    types with validated constructors. A proof id cannot be passed where a
//!    portfolio id is expected.
//!
//! 4. **UTC-only timestamps.** `Timestamp` serializes as
//!    `YYYY-MM-DDTHH:MM:SSZ`, so a summary timestamp hashes identically on
//!    both sides of a verification.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, DataHash, SHA256_HEX_LEN};
pub use error::{CanonicalizationError, DigestError, IdentifierError, TimestampError};
pub use identity::{LoanId, PortfolioId, ProofId};
pub use temporal::Timestamp;
