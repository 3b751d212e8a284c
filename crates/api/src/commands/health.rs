//! Connectivity and runtime health commands

use serde::{Deserialize, Serialize};
use tropeiro_domain::Result;

use crate::context::AppContext;
use crate::utils::command_helpers::run_command;

/// One monitored component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentHealth {
    pub name: String,
    pub healthy: bool,
    pub detail: String,
}

/// Aggregate health answer for the status bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,
    pub components: Vec<ComponentHealth>,
    pub checked_at_ms: u64,
}

/// Probe the backend and report cache occupancy.
///
/// An unreachable backend comes back as an unhealthy report, not an
/// error; the status bar polls this and must never throw.
pub async fn check_connectivity(ctx: &AppContext) -> Result<HealthStatus> {
    run_command("check_connectivity", async {
        let api_ok = ctx.erp.probe().await?;
        let entries = ctx.cache.entry_count();

        let components = vec![
            ComponentHealth {
                name: "api".to_string(),
                healthy: api_ok,
                detail: if api_ok { "reachable".to_string() } else { "unreachable".to_string() },
            },
            ComponentHealth {
                name: "cache".to_string(),
                healthy: true,
                detail: format!("{entries} entries"),
            },
        ];

        Ok(HealthStatus {
            healthy: components.iter().all(|component| component.healthy),
            components,
            checked_at_ms: ctx.clock.millis_since_epoch(),
        })
    })
    .await
}
