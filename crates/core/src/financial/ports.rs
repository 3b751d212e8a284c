//! Port interfaces for the financial read side

use async_trait::async_trait;
use tropeiro_domain::{
    ClientId, FinancialFigures, Installment, InstallmentId, OpenItem, OrderId, ReceivableTitle,
    Result, TitleId,
};

/// One generation of the order summary endpoint.
///
/// Two implementations exist in production: the current endpoint and the
/// legacy one it is replacing. [`FinancialSummaryService`] decides when the
/// fallback generation is consulted; implementations answer with a single
/// attempt so a failing backend is observed quickly instead of being retried
/// behind the resolver's back.
///
/// [`FinancialSummaryService`]: super::reconcile::FinancialSummaryService
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Figures for one order, or `None` when this generation has no record.
    async fn order_figures(&self, order_id: OrderId) -> Result<Option<FinancialFigures>>;

    /// Short name used in resolution logs.
    fn source_name(&self) -> &'static str;
}

/// Read and mutation access to installments and receivable titles.
#[async_trait]
pub trait ReceivablesGateway: Send + Sync {
    /// Installment plan of one order, in installment order.
    async fn installments(&self, order_id: OrderId) -> Result<Vec<Installment>>;

    /// Receivable titles backing one installment.
    async fn titles(&self, installment_id: InstallmentId) -> Result<Vec<ReceivableTitle>>;

    /// Flattened open rows for the dashboards, optionally scoped to one
    /// client.
    async fn open_items(&self, client_id: Option<ClientId>) -> Result<Vec<OpenItem>>;

    /// Void a title. The reason is recorded on the backend audit trail.
    async fn cancel_title(&self, title_id: TitleId, motivo: &str) -> Result<()>;
}
