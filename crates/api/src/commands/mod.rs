//! Command surface - shell to backend bridge
//!
//! One async fn per screen operation, all taking `&AppContext`. Every
//! command runs through [`crate::utils::command_helpers::run_command`] for
//! timing and outcome logs; read commands go through the query cache,
//! mutations clear the scopes they touched before answering.

mod financial;
mod health;
mod orders;
mod payments;
mod receivables;
mod registry;
mod reports;

pub use financial::*;
pub use health::*;
pub use orders::*;
pub use payments::*;
pub use receivables::*;
pub use registry::*;
pub use reports::*;
