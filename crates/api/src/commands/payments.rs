//! Payment registration and title cancellation commands

use tropeiro_core::{CacheInvalidator, PaymentScope};
use tropeiro_domain::{ErpError, PaymentDraft, PaymentReceipt, Result, TitleId};

use crate::context::AppContext;
use crate::utils::command_helpers::run_command;

/// Register a payment against an open title.
///
/// The open amount and the invalidation scope come from the backend's own
/// open-items list, not from the form, so a stale screen cannot overpay a
/// title that moved underneath it. Validation failures never reach the
/// wire; backend rejections come back verbatim.
pub async fn register_payment(ctx: &AppContext, draft: PaymentDraft) -> Result<PaymentReceipt> {
    run_command("register_payment", async {
        let items = ctx.receivables.open_items(None).await?;
        let item = items
            .into_iter()
            .find(|item| item.titulo_id == draft.titulo_id)
            .ok_or_else(|| {
                ErpError::NotFound(format!("Título {} não está em aberto", draft.titulo_id))
            })?;
        let scope = PaymentScope { order_id: item.pedido_id, client_id: item.cliente.id };
        ctx.payments.register(&draft, item.valor_em_aberto(), scope).await
    })
    .await
}

/// Cancel an open title.
///
/// Clears the same scopes a payment would: the title leaves the open
/// lists and the order's own figures change.
pub async fn cancel_title(ctx: &AppContext, titulo_id: TitleId, motivo: &str) -> Result<()> {
    run_command("cancel_title", async {
        let items = ctx.receivables.open_items(None).await?;
        let scope = items.into_iter().find(|item| item.titulo_id == titulo_id);

        ctx.receivables.cancel_title(titulo_id, motivo).await?;

        if let Some(item) = scope {
            if let Some(pedido_id) = item.pedido_id {
                ctx.cache.invalidate_order(pedido_id);
            }
            ctx.cache.invalidate_client(item.cliente.id);
        }
        ctx.cache.invalidate_dashboards();
        Ok(())
    })
    .await
}
