//! # gv-portfolio: Loan Portfolios and the Validation Policy
//!
//! - **Loan / Portfolio** (`loan.rs`): the ingested data model. A portfolio is
//!   immutable once ingested; ingestion checks the declared loan count and
//!   loan id uniqueness.
//!
//! - **Valuation bands** (`valuation.rs`): fixed-point parsing of point
//!   (`"100"`) and range (`"98-100"`) bands into NAV contributions.
//!
//! - **Store** (`store.rs`): read-only reference datasets, seeded with the
//!   healthy and distressed demo portfolios.
//!
//! - **Validation** (`validation.rs`): the fixed policy. No loan may be more
//!   than 90 days past due; the NAV estimate is the sum of band midpoints
//!   times a fixed per-loan notional.
//!
//! ## Crate Policy
//!
//! - Depends only on `gv-core` internally.
//! - Validation is synchronous and side-effect free apart from reading the
//!   clock for the summary timestamp, which `validate_at` lets callers pin.
//! - A malformed loan field aborts validation. There is no numeric default.

pub mod error;
pub mod loan;
pub mod store;
pub mod valuation;
pub mod validation;

pub use error::{IngestError, ValidationDataError};
pub use loan::{Loan, Portfolio};
pub use store::{DatasetSummary, PortfolioStore};
pub use valuation::{ValuationBand, ValuationBandError, PER_LOAN_NOTIONAL};
pub use validation::{
    evaluate, evaluate_at, validate, validate_at, PolicyReport, ValidationSummary, DPD_THRESHOLD,
};
