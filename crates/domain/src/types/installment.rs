//! Installment (parcela) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::status::TitleStatus;

/// One installment of an order's payment plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Installment {
    pub id: i64,
    pub pedido_id: i64,
    /// 1-based position within the plan.
    pub numero: u32,
    pub total_parcelas: u32,
    pub valor: Money,
    #[serde(default)]
    pub valor_pago: Money,
    pub vencimento: NaiveDate,
    #[serde(default)]
    pub status: TitleStatus,
}

impl Installment {
    /// Open balance, clamped at zero. Settled and cancelled installments
    /// report zero regardless of the recorded amounts.
    #[must_use]
    pub fn valor_em_aberto(&self) -> Money {
        if !self.status.counts_as_open() {
            return Money::ZERO;
        }
        self.valor.saturating_sub(self.valor_pago)
    }

    /// Whole days past due as of `today`; never negative.
    #[must_use]
    pub fn dias_atraso(&self, today: NaiveDate) -> i64 {
        if !self.status.counts_as_open() {
            return 0;
        }
        today.signed_duration_since(self.vencimento).num_days().max(0)
    }
}
