//! Current-generation financial adapter
//!
//! Primary source for the order financial summary, plus the receivables
//! read and cancel operations. Summary amounts arrive with an explicit unit
//! tag; the list endpoints use the canonical wire shapes that decode straight
//! into the domain entities.
//!
//! Built over a single-attempt client: financial reads must reflect the
//! backend's first answer, and the cancel mutation must never be replayed.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use tropeiro_core::{ReceivablesGateway, SummarySource};
use tropeiro_domain::{
    ClientId, FinancialFigures, Installment, InstallmentId, OpenItem, OrderId, ReceivableTitle,
    Result, TitleId, TitleStatus, WireAmount,
};

use crate::api::client::ErpClient;

/// Adapter over the current-generation financial endpoints.
#[derive(Clone)]
pub struct FinancialApi {
    client: Arc<ErpClient>,
}

impl FinancialApi {
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }
}

/// Wire shape of `GET /pedidos/{id}/resumo-financeiro`.
///
/// Every field is optional. The backend omits what it cannot compute and the
/// reconciliation layer deals with the holes.
#[derive(Debug, Deserialize)]
struct ResumoFinanceiroDto {
    #[serde(default)]
    valor_total: Option<WireAmount>,
    #[serde(default)]
    valor_pago: Option<WireAmount>,
    #[serde(default)]
    valor_em_aberto: Option<WireAmount>,
    #[serde(default)]
    situacao: Option<String>,
}

impl ResumoFinanceiroDto {
    fn into_figures(self) -> FinancialFigures {
        FinancialFigures {
            valor_total: self.valor_total.map(WireAmount::to_money),
            valor_pago: self.valor_pago.map(WireAmount::to_money),
            valor_em_aberto: self.valor_em_aberto.map(WireAmount::to_money),
            status: self.situacao.as_deref().and_then(summary_status),
        }
    }
}

/// Normalize a summary `situacao` token, dropping unrecognized values.
///
/// An unknown token becomes `None` instead of `Desconhecida` so the
/// reconciliation layer can still derive a status from the amounts.
pub(crate) fn summary_status(token: &str) -> Option<TitleStatus> {
    match TitleStatus::normalize(token) {
        TitleStatus::Desconhecida => {
            warn!(token, "unrecognized status token on financial summary");
            None
        }
        status => Some(status),
    }
}

#[derive(Debug, Serialize)]
struct CancelamentoDto<'a> {
    motivo: &'a str,
}

#[async_trait]
impl SummarySource for FinancialApi {
    async fn order_figures(&self, order_id: OrderId) -> Result<Option<FinancialFigures>> {
        let path = format!("/pedidos/{order_id}/resumo-financeiro");
        let dto: Option<ResumoFinanceiroDto> = self.client.get_optional(&path).await?;
        Ok(dto.map(ResumoFinanceiroDto::into_figures))
    }

    fn source_name(&self) -> &'static str {
        "atual"
    }
}

#[async_trait]
impl ReceivablesGateway for FinancialApi {
    async fn installments(&self, order_id: OrderId) -> Result<Vec<Installment>> {
        self.client.get(&format!("/pedidos/{order_id}/parcelas")).await
    }

    async fn titles(&self, installment_id: InstallmentId) -> Result<Vec<ReceivableTitle>> {
        self.client.get(&format!("/parcelas/{installment_id}/duplicatas")).await
    }

    async fn open_items(&self, client_id: Option<ClientId>) -> Result<Vec<OpenItem>> {
        match client_id {
            Some(id) => {
                self.client
                    .get_with_query("/duplicatas/abertas", &[("cliente_id", id.to_string())])
                    .await
            }
            None => self.client.get("/duplicatas/abertas").await,
        }
    }

    async fn cancel_title(&self, title_id: TitleId, motivo: &str) -> Result<()> {
        let path = format!("/duplicatas/{title_id}/cancelamento");
        let _: serde_json::Value = self.client.post(&path, &CancelamentoDto { motivo }).await?;
        Ok(())
    }
}
