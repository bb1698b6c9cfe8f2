//! # Datasets Subcommand
//!
//! Lists the bundled reference datasets, one per line.

use anyhow::{Context, Result};
use gv_portfolio::PortfolioStore;

use crate::EXIT_OK;

pub fn run_datasets() -> Result<u8> {
    let store = PortfolioStore::seeded().context("failed to load bundled datasets")?;
    for d in store.list() {
        println!("{}\t{}\tas_of={}\tloans={}", d.id, d.name, d.as_of, d.loans);
    }
    Ok(EXIT_OK)
}
