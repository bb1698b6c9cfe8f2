//! # Portfolio Store
//!
//! Read-only reference datasets, keyed by portfolio id and listed in load
//! order. The store never mutates a portfolio after ingestion; lookups hand
//! out shared `Arc<Portfolio>` snapshots.
//!
//! The seeded store carries the two demo tapes shipped with the crate:
//! `healthy-1` (no loan over 90 days) and `distressed-1` (four loans over
//! 90 days, including 120 and 180).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use gv_core::PortfolioId;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::loan::Portfolio;

const HEALTHY_TAPE: &str = include_str!("../data/healthy-1.json");
const DISTRESSED_TAPE: &str = include_str!("../data/distressed-1.json");

/// Listing entry for a stored dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub id: PortfolioId,
    pub name: String,
    pub as_of: NaiveDate,
    /// Number of loans in the dataset.
    pub loans: usize,
}

/// In-memory portfolio reference store.
#[derive(Debug, Clone, Default)]
pub struct PortfolioStore {
    order: Vec<PortfolioId>,
    by_id: HashMap<PortfolioId, Arc<Portfolio>>,
}

impl PortfolioStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store loaded with the bundled demo datasets.
    pub fn seeded() -> Result<Self, IngestError> {
        Self::from_documents([HEALTHY_TAPE, DISTRESSED_TAPE])
    }

    /// Build a store from portfolio JSON documents, in order.
    pub fn from_documents<'a>(
        documents: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, IngestError> {
        let mut store = Self::new();
        for doc in documents {
            store.insert(Portfolio::from_json(doc)?)?;
        }
        Ok(store)
    }

    /// Add a portfolio. Ids are unique; a second load of the same id fails.
    pub fn insert(&mut self, portfolio: Portfolio) -> Result<(), IngestError> {
        let id = portfolio.id().clone();
        if self.by_id.contains_key(&id) {
            return Err(IngestError::DuplicatePortfolio(id.to_string()));
        }
        tracing::debug!(portfolio_id = %id, loans = portfolio.loan_count(), "portfolio loaded");
        self.order.push(id.clone());
        self.by_id.insert(id, Arc::new(portfolio));
        Ok(())
    }

    /// Look up a portfolio by id.
    pub fn get(&self, id: &PortfolioId) -> Option<Arc<Portfolio>> {
        self.by_id.get(id).cloned()
    }

    /// Look up a portfolio by its string id.
    pub fn get_str(&self, id: &str) -> Option<Arc<Portfolio>> {
        PortfolioId::new(id).ok().and_then(|id| self.get(&id))
    }

    /// Summaries of all datasets, in load order.
    pub fn list(&self) -> Vec<DatasetSummary> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .map(|p| DatasetSummary {
                id: p.id().clone(),
                name: p.name().to_string(),
                as_of: p.as_of(),
                loans: p.loan_count(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_lists_demo_datasets_in_order() {
        let store = PortfolioStore::seeded().unwrap();
        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id.as_str(), "healthy-1");
        assert_eq!(list[0].name, "Healthy Portfolio (Alpha)");
        assert_eq!(list[0].loans, 20);
        assert_eq!(list[1].id.as_str(), "distressed-1");
        assert_eq!(list[1].as_of, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn lookup_by_id() {
        let store = PortfolioStore::seeded().unwrap();
        assert_eq!(store.get_str("distressed-1").unwrap().loan_count(), 20);
        assert!(store.get_str("unknown-1").is_none());
        assert!(store.get_str("").is_none());
    }

    #[test]
    fn duplicate_portfolio_rejected() {
        let result = PortfolioStore::from_documents([HEALTHY_TAPE, HEALTHY_TAPE]);
        assert!(matches!(result, Err(IngestError::DuplicatePortfolio(id)) if id == "healthy-1"));
    }

    #[test]
    fn listing_serializes_camel_case() {
        let store = PortfolioStore::seeded().unwrap();
        let v = serde_json::to_value(&store.list()[0]).unwrap();
        assert_eq!(v["asOf"], "2026-02-01");
        assert_eq!(v["loans"], 20);
    }
}
