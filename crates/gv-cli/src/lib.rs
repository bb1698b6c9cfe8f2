//! # gv-cli: CLI Tool for GlassVault
//!
//! ## Subcommands
//!
//! - `gv datasets`: list the bundled reference datasets.
//! - `gv validate`: run the >90 days-past-due policy over a portfolio.
//! - `gv hash`: compute the commitment hash for a portfolio snapshot.
//! - `gv attest`: validate, attest and verify in one process.
//! - `gv check`: check a proof record file against portfolio data, offline.
//!
//! Portfolios come from a bundled dataset id or a JSON file:
//!
//! ```bash
//! gv validate healthy-1
//! gv hash --file tape.json --summary summary.json
//! gv attest distressed-1 --out evidence.json
//! gv attest healthy-1 --offline --out record.json
//! gv check healthy-1 --record record.json
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` policy failure or hash mismatch, `2` operational error.

pub mod attest;
pub mod check;
pub mod datasets;
pub mod hash;
pub mod source;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILED: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// Write `value` as pretty JSON to `path`.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
