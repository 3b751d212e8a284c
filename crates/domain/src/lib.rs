//! # Tropeiro Domain
//!
//! Business domain types and models for the Tropeiro financial core.
//!
//! This crate contains:
//! - Domain data types (orders, installments, receivable titles, payments)
//! - Status vocabularies and the legacy-token translation tables
//! - The money model (two-decimal amounts with explicit wire units)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Tropeiro crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod money;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use money::{AmountUnit, Money, WireAmount};
pub use types::*;
