//! Shared utilities for Tropeiro crates.
//!
//! Two concerns live here:
//! - `time`: a clock abstraction so date/staleness logic is deterministic in
//!   tests
//! - `format`: pt-BR presentation helpers (currency, dates, CPF/CNPJ)
//!
//! This crate has no async machinery and no I/O; everything is pure and
//! synchronous.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod format;
pub mod time;

pub use format::{
    format_brl, format_date_br, format_document, parse_brl, parse_date_br, FormatError,
};
pub use time::{Clock, MockClock, SystemClock};
