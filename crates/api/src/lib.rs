//! # Tropeiro App
//!
//! Application layer the desktop shell binds to.
//!
//! This crate contains:
//! - Commands (one async fn per screen operation)
//! - Application context (dependency injection)
//! - Logging and notification plumbing
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core` and `infra`
//! - [`AppContext`] wires the HTTP adapters, query cache and services
//! - Read commands go through the cache; mutations clear the scopes they
//!   touched before answering

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod commands;
pub mod context;
pub mod utils;

// Re-export commonly used items
pub use commands::*;
pub use context::{AppContext, AppContextBuilder};
pub use utils::logging::init_tracing;
pub use utils::notify::TracingNotifier;
