//! Portfolio source selection shared by the subcommands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use gv_portfolio::{Portfolio, PortfolioStore};

/// A bundled dataset id or a portfolio JSON file. Exactly one is required.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct PortfolioSource {
    /// Bundled dataset id (e.g. `healthy-1`).
    #[arg(value_name = "DATASET")]
    pub dataset: Option<String>,

    /// Path to a portfolio JSON document.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl PortfolioSource {
    pub fn dataset(id: impl Into<String>) -> Self {
        Self {
            dataset: Some(id.into()),
            file: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            dataset: None,
            file: Some(path.into()),
        }
    }

    /// A store holding the selected portfolio, plus the portfolio itself.
    ///
    /// Dataset ids resolve against the bundled store. A file is ingested into
    /// a store of its own.
    pub fn load(&self) -> Result<(PortfolioStore, Arc<Portfolio>)> {
        match (&self.dataset, &self.file) {
            (Some(id), None) => {
                let store = PortfolioStore::seeded().context("failed to load bundled datasets")?;
                let portfolio = store
                    .get_str(id)
                    .with_context(|| format!("unknown dataset: {id}"))?;
                Ok((store, portfolio))
            }
            (None, Some(path)) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read file: {}", path.display()))?;
                let portfolio = Portfolio::from_json(&content)
                    .with_context(|| format!("failed to ingest portfolio: {}", path.display()))?;
                let id = portfolio.id().clone();
                let mut store = PortfolioStore::new();
                store.insert(portfolio)?;
                let portfolio = store
                    .get(&id)
                    .with_context(|| format!("portfolio {id} missing after ingest"))?;
                Ok((store, portfolio))
            }
            _ => bail!("give exactly one of DATASET or --file"),
        }
    }
}
