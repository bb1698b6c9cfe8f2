//! # API Route Modules
//!
//! - `datasets`: reference portfolios and server-side validation.
//! - `proofs`: attestation, verification, evidence export, recent proofs.
//! - `status`: service health and outage simulation.

pub mod datasets;
pub mod proofs;
pub mod status;
