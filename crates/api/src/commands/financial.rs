//! Financial summary and installment commands

use serde::{Deserialize, Serialize};
use tracing::warn;
use tropeiro_domain::{
    FinancialOverview, Installment, InstallmentId, Money, OrderId, ReceivableTitle, Result,
};
use tropeiro_infra::{EntityKind, QueryKey};

use crate::context::AppContext;
use crate::utils::command_helpers::{cached, run_command};

/// Installment row with the derived fields the screens render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstallmentView {
    #[serde(flatten)]
    pub parcela: Installment,
    /// Open balance, zero for settled and cancelled installments.
    pub valor_em_aberto: Money,
    /// Whole days past due as of today, never negative.
    pub dias_atraso: i64,
}

/// Resolved financial position of an order.
///
/// Answers from the cache when fresh; a miss runs the dual-source
/// resolution (current generation first, legacy fallback).
pub async fn order_overview(ctx: &AppContext, pedido_id: OrderId) -> Result<FinancialOverview> {
    run_command("order_overview", async {
        let key = QueryKey::bare(EntityKind::Summary, Some(pedido_id));
        cached(&ctx.cache, key, || ctx.summaries.resolve(pedido_id)).await
    })
    .await
}

/// Installments of an order, each carrying its open balance and overdue
/// days computed against the context clock.
pub async fn order_installments(
    ctx: &AppContext,
    pedido_id: OrderId,
) -> Result<Vec<InstallmentView>> {
    run_command("order_installments", async {
        let key = QueryKey::bare(EntityKind::Installments, Some(pedido_id));
        cached(&ctx.cache, key, || async {
            let today = ctx.clock.today_utc();
            let parcelas = ctx.receivables.installments(pedido_id).await?;
            Ok(parcelas
                .into_iter()
                .map(|parcela| InstallmentView {
                    valor_em_aberto: parcela.valor_em_aberto(),
                    dias_atraso: parcela.dias_atraso(today),
                    parcela,
                })
                .collect())
        })
        .await
    })
    .await
}

/// Titles backing an installment.
///
/// When the caller passes the installment value, a face-sum divergence is
/// logged. The backend owns the data, so the answer still flows.
pub async fn installment_titles(
    ctx: &AppContext,
    parcela_id: InstallmentId,
    valor_parcela: Option<Money>,
) -> Result<Vec<ReceivableTitle>> {
    run_command("installment_titles", async {
        let key = QueryKey::bare(EntityKind::Titles, Some(parcela_id));
        let titles: Vec<ReceivableTitle> =
            cached(&ctx.cache, key, || ctx.receivables.titles(parcela_id)).await?;
        if let Some(esperado) = valor_parcela {
            let soma: Money = titles.iter().map(|title| title.valor).sum();
            if soma != esperado {
                warn!(
                    parcela_id,
                    %soma,
                    %esperado,
                    "title face sum diverges from installment value"
                );
            }
        }
        Ok(titles)
    })
    .await
}
