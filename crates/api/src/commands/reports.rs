//! Report download commands

use tropeiro_domain::{ClientId, Result};
use tropeiro_infra::ReportDownload;

use crate::context::AppContext;
use crate::utils::command_helpers::run_command;

/// Receivables report as a downloadable blob, optionally scoped to one
/// client. Never cached; the backend renders it fresh on every request.
pub async fn receivables_report(
    ctx: &AppContext,
    cliente_id: Option<ClientId>,
) -> Result<ReportDownload> {
    run_command("receivables_report", async {
        ctx.reports.receivables_report(cliente_id).await
    })
    .await
}
