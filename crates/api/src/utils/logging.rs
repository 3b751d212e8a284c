//! Command execution logging
//!
//! Every command emits exactly one structured event on completion:
//! `command_execution_success` or `command_execution_failure`, carrying the
//! command name, elapsed milliseconds and a stable error label. Dashboards
//! filter on the label; the full error text rides along for humans.

use std::time::Duration;

use tracing::{info, warn};
use tropeiro_domain::ErpError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls the filter; without it everything logs at `info`.
/// Calling twice is harmless, the second install is ignored.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Log the outcome of one command execution.
#[inline]
pub fn log_command_execution(command: &str, duration: Duration, outcome: Result<(), &ErpError>) {
    let duration_ms = duration.as_millis() as u64;
    match outcome {
        Ok(()) => {
            info!(command, duration_ms, "command_execution_success");
        }
        Err(err) => {
            warn!(
                command,
                duration_ms,
                error = error_label(err),
                detail = %err,
                "command_execution_failure"
            );
        }
    }
}

/// Stable, low-cardinality label for an error category.
#[must_use]
pub fn error_label(err: &ErpError) -> &'static str {
    match err {
        ErpError::Network(_) => "network",
        ErpError::Auth(_) => "auth",
        ErpError::Forbidden(_) => "forbidden",
        ErpError::Validation(_) => "validation",
        ErpError::Business(_) => "business",
        ErpError::NotFound(_) => "not_found",
        ErpError::Config(_) => "config",
        ErpError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_cover_every_error_category() {
        assert_eq!(error_label(&ErpError::Network("offline".into())), "network");
        assert_eq!(error_label(&ErpError::Validation("valor".into())), "validation");
        assert_eq!(error_label(&ErpError::Business("bloqueado".into())), "business");
        assert_eq!(error_label(&ErpError::NotFound(String::new())), "not_found");
    }
}
