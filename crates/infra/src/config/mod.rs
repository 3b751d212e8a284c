//! Configuration loading
//!
//! Resolution order is environment variables over config file over the
//! hardcoded defaults. See [`loader::load`] for the entry point.

mod loader;

pub use loader::{load, load_from_file, probe_config_paths};
