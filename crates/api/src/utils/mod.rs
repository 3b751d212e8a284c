//! Command plumbing shared across the command modules

pub mod command_helpers;
pub mod logging;
pub mod notify;
