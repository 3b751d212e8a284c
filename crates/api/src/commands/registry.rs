//! Registry lookup commands

use tropeiro_domain::{PartyRef, Result};
use tropeiro_infra::{EntityKind, QueryKey};

use crate::context::AppContext;
use crate::utils::command_helpers::{cached, run_command};

/// Clients matching an optional search term, cached per term.
///
/// The term is trimmed before keying, so `" silva "` and `"silva"` share a
/// cache slot and a blank search shares the unfiltered one.
pub async fn clients(ctx: &AppContext, busca: Option<String>) -> Result<Vec<PartyRef>> {
    run_command("clients", async {
        let busca = busca.and_then(|text| {
            let text = text.trim().to_string();
            (!text.is_empty()).then_some(text)
        });
        let key = QueryKey::with_params(EntityKind::Clients, None, &busca)?;
        cached(&ctx.cache, key, || async { ctx.registry.clients(busca.as_deref()).await }).await
    })
    .await
}

/// All registered suppliers, cached.
pub async fn suppliers(ctx: &AppContext) -> Result<Vec<PartyRef>> {
    run_command("suppliers", async {
        let key = QueryKey::bare(EntityKind::Suppliers, None);
        cached(&ctx.cache, key, || ctx.registry.suppliers()).await
    })
    .await
}

/// All registered carriers, cached.
pub async fn carriers(ctx: &AppContext) -> Result<Vec<PartyRef>> {
    run_command("carriers", async {
        let key = QueryKey::bare(EntityKind::Carriers, None);
        cached(&ctx.cache, key, || ctx.registry.carriers()).await
    })
    .await
}
