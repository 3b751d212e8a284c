//! Financial read side
//!
//! Resolution reconciles the two summary endpoints into one overview;
//! aggregation folds flattened open rows into dashboard buckets. Both keep
//! their arithmetic in pure functions so the services stay thin.

pub mod aggregate;
pub mod ports;
pub mod reconcile;

pub use aggregate::AggregationService;
pub use reconcile::FinancialSummaryService;
