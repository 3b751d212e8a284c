//! Open-receivables dashboard commands

use tropeiro_domain::{ClientBalance, ClientId, OpenItem, OrderBalance, Result};
use tropeiro_infra::{EntityKind, QueryKey};

use crate::context::AppContext;
use crate::utils::command_helpers::{cached, run_command};

/// Raw open items, optionally scoped to one client.
pub async fn open_items(ctx: &AppContext, cliente_id: Option<ClientId>) -> Result<Vec<OpenItem>> {
    run_command("open_items", async {
        let key = QueryKey::bare(EntityKind::OpenItems, cliente_id);
        cached(&ctx.cache, key, || ctx.receivables.open_items(cliente_id)).await
    })
    .await
}

/// Per-client open balance buckets for the receivables dashboard.
pub async fn client_balances(
    ctx: &AppContext,
    cliente_id: Option<ClientId>,
) -> Result<Vec<ClientBalance>> {
    run_command("client_balances", async {
        let key = QueryKey::bare(EntityKind::ClientBalances, cliente_id);
        cached(&ctx.cache, key, || ctx.aggregation.client_balances(cliente_id)).await
    })
    .await
}

/// Per-order open balance buckets for the receivables dashboard.
pub async fn order_balances(ctx: &AppContext) -> Result<Vec<OrderBalance>> {
    run_command("order_balances", async {
        let key = QueryKey::bare(EntityKind::OrderBalances, None);
        cached(&ctx.cache, key, || ctx.aggregation.order_balances()).await
    })
    .await
}
