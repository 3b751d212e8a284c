//! Domain data types

pub mod aggregate;
pub mod installment;
pub mod order;
pub mod payment;
pub mod receivable;
pub mod status;
pub mod summary;

pub use aggregate::*;
pub use installment::*;
pub use order::*;
pub use payment::*;
pub use receivable::*;
pub use status::*;
pub use summary::*;

/// Identifier aliases used at port boundaries for readability.
pub type OrderId = i64;
pub type ClientId = i64;
pub type InstallmentId = i64;
pub type TitleId = i64;
