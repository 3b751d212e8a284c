//! Orders adapter
//!
//! Order lookups plus the payment-terms change. These endpoints already
//! speak the canonical wire shapes, so payloads decode straight into the
//! domain entities.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tropeiro_core::OrdersGateway;
use tropeiro_domain::{ClientId, Order, OrderId, PaymentTerms, Result};

use crate::api::client::ErpClient;

/// Adapter over the `/pedidos` endpoints.
#[derive(Clone)]
pub struct OrdersApi {
    client: Arc<ErpClient>,
}

impl OrdersApi {
    pub fn new(client: Arc<ErpClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct CondicaoPagamentoDto {
    condicao: PaymentTerms,
    #[serde(skip_serializing_if = "Option::is_none")]
    qtd_parcelas: Option<u32>,
}

#[async_trait]
impl OrdersGateway for OrdersApi {
    async fn order(&self, order_id: OrderId) -> Result<Option<Order>> {
        self.client.get_optional(&format!("/pedidos/{order_id}")).await
    }

    async fn orders_by_client(&self, client_id: ClientId) -> Result<Vec<Order>> {
        self.client.get(&format!("/clientes/{client_id}/pedidos")).await
    }

    async fn change_terms(
        &self,
        order_id: OrderId,
        condicao: PaymentTerms,
        qtd_parcelas: Option<u32>,
    ) -> Result<Order> {
        let path = format!("/pedidos/{order_id}/condicao-pagamento");
        let body = CondicaoPagamentoDto { condicao, qtd_parcelas };
        self.client.put(&path, &body).await
    }
}
