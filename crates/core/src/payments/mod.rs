//! Payment write side
//!
//! Draft validation runs before anything touches the wire; the registration
//! flow guarantees a single in-flight submission and clears the affected
//! cache scopes on success.

pub mod ports;
pub mod service;
pub mod validate;

pub use service::{PaymentFlow, PaymentService};
