//! Dashboard aggregation types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::order::PartyRef;
use crate::types::status::TitleStatus;

/// Flattened open-receivable row consumed by the dashboard folds.
///
/// `pedido_id` is absent on rows imported from the legacy system, which
/// tracked titles without an order link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenItem {
    pub titulo_id: i64,
    #[serde(default)]
    pub pedido_id: Option<i64>,
    pub cliente: PartyRef,
    pub valor: Money,
    #[serde(default)]
    pub valor_pago: Money,
    pub vencimento: NaiveDate,
    #[serde(default)]
    pub status: TitleStatus,
}

impl OpenItem {
    /// Open balance, clamped at zero; settled and cancelled rows report
    /// zero.
    #[must_use]
    pub fn valor_em_aberto(&self) -> Money {
        if !self.status.counts_as_open() {
            return Money::ZERO;
        }
        self.valor.saturating_sub(self.valor_pago)
    }
}

/// Per-client open-receivables bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientBalance {
    pub cliente_id: i64,
    pub cliente_nome: String,
    pub total_aberto: Money,
    pub parcelas_aberto: u32,
    /// Days of the most overdue open item. A maximum, never a sum.
    pub maior_atraso_dias: i64,
}

/// Per-order open-receivables bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderBalance {
    pub pedido_id: i64,
    pub total_aberto: Money,
    pub parcelas_aberto: u32,
    pub maior_atraso_dias: i64,
}
