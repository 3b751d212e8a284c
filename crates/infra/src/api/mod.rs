//! HTTP adapters for the tropeiro ERP backend
//!
//! Everything that talks to the backend lives here. The shared [`ErpClient`]
//! owns URL resolution, bearer injection, status-to-error mapping and byte
//! downloads; the per-area adapters ([`FinancialApi`], [`LegacyFinancialApi`],
//! [`PaymentsApi`], [`OrdersApi`], [`RegistryApi`], [`ReportsApi`]) translate
//! wire payloads into domain entities and implement the core ports.
//!
//! # Architecture
//!
//! - All traffic goes through [`crate::http::HttpClient`] (no direct reqwest)
//! - Bearer tokens come from a [`TokenProvider`]; absent token means anonymous
//! - Backend-provided `mensagem` text is preserved verbatim in errors
//! - Financial reads and payment posts are built without retry

pub mod auth;
pub mod client;
pub mod financial;
pub mod legacy;
pub mod orders;
pub mod payments;
pub mod registry;
pub mod reports;

pub use auth::{MemoryTokenStore, TokenProvider};
pub use client::{ErpClient, ErpClientConfig, ReportDownload};
pub use financial::FinancialApi;
pub use legacy::LegacyFinancialApi;
pub use orders::OrdersApi;
pub use payments::PaymentsApi;
pub use registry::RegistryApi;
pub use reports::ReportsApi;
