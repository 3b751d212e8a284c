//! Receivable title (duplicata) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::payment::PaymentMethod;
use crate::types::status::TitleStatus;

/// A receivable title backing an installment.
///
/// The current model links titles to installments; the legacy model linked
/// them straight to orders. Both links are optional on the wire so payloads
/// from either generation decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReceivableTitle {
    pub id: i64,
    pub numero_documento: String,
    #[serde(default)]
    pub parcela_id: Option<i64>,
    #[serde(default)]
    pub pedido_id: Option<i64>,
    pub valor: Money,
    #[serde(default)]
    pub valor_pago: Money,
    pub vencimento: NaiveDate,
    #[serde(default)]
    pub forma_pagamento: PaymentMethod,
    #[serde(default)]
    pub status: TitleStatus,
}

impl ReceivableTitle {
    /// Open balance, clamped at zero.
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
