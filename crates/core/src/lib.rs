//! # Tropeiro Core
//!
//! Business logic for the financial frontend core. Everything in this crate
//! is expressed against port traits; no module here performs I/O of its own,
//! which keeps resolution, aggregation and payment rules testable with plain
//! in-memory fakes.
//!
//! ## Layout
//!
//! - `financial` - dual-source summary resolution and open-balance folds
//! - `payments` - draft validation and the registration flow
//! - `orders_ports` / `registry_ports` - read/mutation ports the command
//!   layer wires to HTTP adapters

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod financial;
pub mod orders_ports;
pub mod payments;
pub mod registry_ports;

// Re-export specific items to avoid ambiguity
pub use financial::aggregate::{client_balances, days_overdue, order_balances, AggregationService};
pub use financial::ports::{ReceivablesGateway, SummarySource};
pub use financial::reconcile::{merge_figures, resolve_overview, FinancialSummaryService};
pub use orders_ports::OrdersGateway;
pub use payments::ports::{
    CacheInvalidator, NoopInvalidator, Notification, NotificationKind, Notifier, PaymentGateway,
};
pub use payments::service::{PaymentFlow, PaymentScope, PaymentService, PaymentState};
pub use payments::validate::validate_draft;
pub use registry_ports::RegistryGateway;
