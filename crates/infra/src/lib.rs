//! # Tropeiro Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The retrying HTTP client and the authenticated ERP API client
//! - API adapters for both summary endpoint generations, receivables,
//!   payments, orders, registry and report blobs
//! - The content-addressed query cache with scope invalidation
//! - Configuration loading (environment, file, defaults)
//!
//! ## Architecture
//! - Implements traits defined in `tropeiro-core`
//! - Contains all "impure" code (network, environment, filesystem)

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod api;
pub mod cache;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    ErpClient, ErpClientConfig, FinancialApi, LegacyFinancialApi, MemoryTokenStore, OrdersApi,
    PaymentsApi, RegistryApi, ReportDownload, ReportsApi, TokenProvider,
};
pub use cache::{CachedEntry, EntityKind, QueryCache, QueryKey};
pub use errors::InfraError;
pub use http::HttpClient;
