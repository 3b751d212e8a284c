//! Order lookup and payment-term commands

use tropeiro_core::CacheInvalidator;
use tropeiro_domain::{ClientId, ErpError, Order, OrderId, PaymentTerms, Result};
use tropeiro_infra::{EntityKind, QueryKey};

use crate::context::AppContext;
use crate::utils::command_helpers::{cached, run_command};

/// One order, cached per id.
///
/// A missing order answers `NotFound` so the screens can tell "gone" apart
/// from "backend down"; the miss is never cached.
pub async fn order_details(ctx: &AppContext, pedido_id: OrderId) -> Result<Order> {
    run_command("order_details", async {
        let key = QueryKey::bare(EntityKind::Order, Some(pedido_id));
        cached(&ctx.cache, key, || async {
            ctx.orders
                .order(pedido_id)
                .await?
                .ok_or_else(|| ErpError::NotFound(format!("Pedido {pedido_id} não encontrado")))
        })
        .await
    })
    .await
}

/// All orders of one client, cached per client.
pub async fn client_orders(ctx: &AppContext, cliente_id: ClientId) -> Result<Vec<Order>> {
    run_command("client_orders", async {
        let key = QueryKey::bare(EntityKind::Orders, Some(cliente_id));
        cached(&ctx.cache, key, || ctx.orders.orders_by_client(cliente_id)).await
    })
    .await
}

/// Change the payment terms of an order.
///
/// Drops every cached read the change invalidates (the order itself, its
/// installment plan, its summary) before answering with the updated order.
pub async fn change_terms(
    ctx: &AppContext,
    pedido_id: OrderId,
    condicao: PaymentTerms,
    qtd_parcelas: Option<u32>,
) -> Result<Order> {
    run_command("change_terms", async {
        if condicao == PaymentTerms::Parcelado && qtd_parcelas.is_none() {
            return Err(ErpError::Validation(
                "Informe a quantidade de parcelas para a condição parcelada".to_string(),
            ));
        }
        let updated = ctx.orders.change_terms(pedido_id, condicao, qtd_parcelas).await?;
        ctx.cache.invalidate_order(pedido_id);
        Ok(updated)
    })
    .await
}
