//! Port interface for order reads and mutations

use async_trait::async_trait;
use tropeiro_domain::{ClientId, Order, OrderId, PaymentTerms, Result};

/// Order access as the financial screens need it.
#[async_trait]
pub trait OrdersGateway: Send + Sync {
    /// One order, or `None` when the backend has no record.
    async fn order(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// All orders of one client, newest first.
    async fn orders_by_client(&self, client_id: ClientId) -> Result<Vec<Order>>;

    /// Change the payment terms of an order. `qtd_parcelas` is required for
    /// installment terms and ignored otherwise. Returns the updated order.
    async fn change_terms(
        &self,
        order_id: OrderId,
        condicao: PaymentTerms,
        qtd_parcelas: Option<u32>,
    ) -> Result<Order>;
}
