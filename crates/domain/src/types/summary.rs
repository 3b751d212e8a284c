//! Financial summary types
//!
//! [`FinancialFigures`] is the partial record one source yields;
//! [`FinancialOverview`] is the resolved, internally consistent view the
//! screens render. The merge and derivation rules live in the core crate.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::status::TitleStatus;

/// Field-by-field figures as reported by a single source.
///
/// Absent fields stay `None` so the reconciliation can backfill them from
/// the other API generation without ever summing amounts across sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialFigures {
    pub valor_total: Option<Money>,
    pub valor_pago: Option<Money>,
    pub valor_em_aberto: Option<Money>,
    pub status: Option<TitleStatus>,
}

impl FinancialFigures {
    /// Structurally empty: the source answered but carried nothing usable.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.valor_total.is_none()
            && self.valor_pago.is_none()
            && self.valor_em_aberto.is_none()
            && self.status.is_none()
    }

    /// A record without a total cannot anchor an overview on its own.
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        self.valor_total.is_none()
    }
}

/// Which API generation(s) produced an overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Atual,
    Legado,
    Combinado,
    Indisponivel,
}

/// Resolved financial position of an order.
///
/// The three amounts are always mutually consistent:
/// `valor_em_aberto == max(0, valor_total − valor_pago)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialOverview {
    pub valor_total: Money,
    pub valor_pago: Money,
    pub valor_em_aberto: Money,
    pub status: TitleStatus,
    pub origem: DataOrigin,
}

impl FinancialOverview {
    /// The no-data answer when every source failed. Screens render an empty
    /// state instead of an error.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            valor_total: Money::ZERO,
            valor_pago: Money::ZERO,
            valor_em_aberto: Money::ZERO,
            status: TitleStatus::Desconhecida,
            origem: DataOrigin::Indisponivel,
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self.origem, DataOrigin::Indisponivel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_incomplete_are_distinct() {
        let empty = FinancialFigures::default();
        assert!(empty.is_empty());
        assert!(empty.is_incomplete());

        let status_only =
            FinancialFigures { status: Some(TitleStatus::Aberta), ..FinancialFigures::default() };
        assert!(!status_only.is_empty());
        assert!(status_only.is_incomplete());

        let with_total = FinancialFigures {
            valor_total: Some(Money::from(100)),
            ..FinancialFigures::default()
        };
        assert!(!with_total.is_empty());
        assert!(!with_total.is_incomplete());
    }

    #[test]
    fn unavailable_overview_is_explicitly_flagged() {
        let overview = FinancialOverview::unavailable();
        assert!(!overview.is_available());
        assert_eq!(overview.valor_em_aberto, Money::ZERO);
        assert_eq!(overview.status, TitleStatus::Desconhecida);
    }
}
