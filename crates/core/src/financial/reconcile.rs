//! Dual-source financial summary resolution
//!
//! The current endpoint is authoritative; the legacy endpoint only backs it
//! up. Resolution is strictly sequential (the legacy call is issued only
//! after the primary outcome is known) and merging is a pure function, so
//! precedence rules are testable without I/O.

use std::sync::Arc;

use tracing::{debug, warn};
use tropeiro_domain::{
    DataOrigin, FinancialFigures, FinancialOverview, Money, OrderId, Result, TitleStatus,
};

use super::ports::SummarySource;

/// Merge two partial records field by field.
///
/// Primary values win; absent fields are backfilled from the fallback.
/// Amounts are never summed across sources.
#[must_use]
pub fn merge_figures(primary: FinancialFigures, fallback: FinancialFigures) -> FinancialFigures {
    FinancialFigures {
        valor_total: primary.valor_total.or(fallback.valor_total),
        valor_pago: primary.valor_pago.or(fallback.valor_pago),
        valor_em_aberto: primary.valor_em_aberto.or(fallback.valor_em_aberto),
        status: primary.status.or(fallback.status),
    }
}

/// Derive a consistent overview from merged figures.
///
/// The paid amount is authoritative when reported; otherwise it is derived
/// from the reported open amount. The open amount is always recomputed as
/// `max(0, total - pago)` so the three amounts agree even when the sources
/// disagreed, and a missing status falls back to an amount-based derivation.
#[must_use]
pub fn resolve_overview(figures: FinancialFigures, origem: DataOrigin) -> FinancialOverview {
    let valor_total = figures.valor_total.unwrap_or(Money::ZERO);
    let valor_pago = figures.valor_pago.unwrap_or_else(|| {
        let aberto = figures.valor_em_aberto.unwrap_or(Money::ZERO);
        valor_total.saturating_sub(aberto)
    });
    let valor_em_aberto = valor_total.saturating_sub(valor_pago);
    let status = figures
        .status
        .unwrap_or_else(|| derive_status(valor_total, valor_pago));

    FinancialOverview {
        valor_total,
        valor_pago,
        valor_em_aberto,
        status,
        origem,
    }
}

fn derive_status(total: Money, pago: Money) -> TitleStatus {
    if total.is_positive() && pago >= total {
        TitleStatus::Paga
    } else if pago.is_positive() {
        TitleStatus::ParcialmentePaga
    } else {
        TitleStatus::Aberta
    }
}

fn conclude_without_fallback(
    order_id: OrderId,
    primary: Option<FinancialFigures>,
) -> FinancialOverview {
    match primary {
        Some(figures) if !figures.is_empty() => resolve_overview(figures, DataOrigin::Atual),
        _ => {
            warn!(order_id, "no financial data available from either source");
            FinancialOverview::unavailable()
        }
    }
}

/// Resolves an order's financial overview across the two API generations.
pub struct FinancialSummaryService {
    primary: Arc<dyn SummarySource>,
    fallback: Arc<dyn SummarySource>,
}

impl FinancialSummaryService {
    pub fn new(primary: Arc<dyn SummarySource>, fallback: Arc<dyn SummarySource>) -> Self {
        Self { primary, fallback }
    }

    /// Resolve the overview for one order.
    ///
    /// The fallback is consulted only when the primary errored, answered
    /// nothing, or answered a record with no total. Auth errors propagate
    /// immediately: both generations share the session, so a second call
    /// cannot succeed and would only delay the re-login.
    ///
    /// Exhaustion of both sources is not an error; the caller receives an
    /// [`FinancialOverview::unavailable`] overview and decides how to render
    /// it.
    ///
    /// # Errors
    ///
    /// Returns the underlying error only for auth failures.
    pub async fn resolve(&self, order_id: OrderId) -> Result<FinancialOverview> {
        let primary_figures = match self.primary.order_figures(order_id).await {
            Ok(Some(figures)) if !figures.is_incomplete() => {
                debug!(
                    order_id,
                    source = self.primary.source_name(),
                    "summary resolved by primary source"
                );
                return Ok(resolve_overview(figures, DataOrigin::Atual));
            }
            Ok(Some(figures)) => {
                debug!(
                    order_id,
                    source = self.primary.source_name(),
                    "primary source answered an incomplete record"
                );
                Some(figures)
            }
            Ok(None) => {
                debug!(
                    order_id,
                    source = self.primary.source_name(),
                    "primary source has no record"
                );
                None
            }
            Err(err) if err.is_auth() => return Err(err),
            Err(err) => {
                warn!(
                    order_id,
                    source = self.primary.source_name(),
                    error = %err,
                    "primary source failed, consulting fallback"
                );
                None
            }
        };

        match self.fallback.order_figures(order_id).await {
            Ok(Some(fallback_figures)) => {
                let (merged, origem) = match primary_figures {
                    Some(primary) if !primary.is_empty() => (
                        merge_figures(primary, fallback_figures),
                        DataOrigin::Combinado,
                    ),
                    _ => (fallback_figures, DataOrigin::Legado),
                };
                if merged.is_empty() {
                    warn!(order_id, "both sources answered empty records");
                    return Ok(FinancialOverview::unavailable());
                }
                Ok(resolve_overview(merged, origem))
            }
            Ok(None) => Ok(conclude_without_fallback(order_id, primary_figures)),
            Err(err) if err.is_auth() => Err(err),
            Err(err) => {
                warn!(
                    order_id,
                    source = self.fallback.source_name(),
                    error = %err,
                    "fallback source failed"
                );
                Ok(conclude_without_fallback(order_id, primary_figures))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tropeiro_domain::ErpError;

    use super::*;

    #[derive(Clone, Copy)]
    enum StubBehavior {
        Figures(FinancialFigures),
        Empty,
        NetworkError,
        AuthError,
    }

    struct StubSource {
        name: &'static str,
        behavior: StubBehavior,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(name: &'static str, behavior: StubBehavior) -> Arc<Self> {
            Arc::new(Self {
                name,
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SummarySource for StubSource {
        async fn order_figures(&self, _order_id: OrderId) -> Result<Option<FinancialFigures>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                StubBehavior::Figures(figures) => Ok(Some(figures)),
                StubBehavior::Empty => Ok(None),
                StubBehavior::NetworkError => Err(ErpError::Network("HTTP 500".to_string())),
                StubBehavior::AuthError => Err(ErpError::Auth("HTTP 401".to_string())),
            }
        }

        fn source_name(&self) -> &'static str {
            self.name
        }
    }

    fn figures(total: i64, pago: i64, aberto: i64) -> FinancialFigures {
        FinancialFigures {
            valor_total: Some(Money::from(total)),
            valor_pago: Some(Money::from(pago)),
            valor_em_aberto: Some(Money::from(aberto)),
            status: None,
        }
    }

    /// Validates that a complete primary answer ends resolution.
    ///
    /// Assertions:
    /// - Amounts come from the primary source untouched
    /// - Origin is marked as the current generation
    /// - The legacy source is never called
    #[tokio::test]
    async fn test_resolve_primary_success_skips_fallback() {
        let primary = StubSource::new("atual", StubBehavior::Figures(figures(100, 40, 60)));
        let fallback = StubSource::new("legado", StubBehavior::Figures(figures(999, 0, 999)));
        let service = FinancialSummaryService::new(primary.clone(), fallback.clone());

        let overview = service.resolve(42).await.unwrap();

        assert_eq!(overview.valor_total, Money::from(100));
        assert_eq!(overview.valor_pago, Money::from(40));
        assert_eq!(overview.valor_em_aberto, Money::from(60));
        assert_eq!(overview.origem, DataOrigin::Atual);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(fallback.call_count(), 0);
    }

    /// Validates fallback behavior when the primary endpoint errors.
    ///
    /// Assertions:
    /// - The legacy answer is used as-is
    /// - Origin is marked as legacy
    /// - The primary source is attempted exactly once
    #[tokio::test]
    async fn test_resolve_falls_back_on_primary_error() {
        let primary = StubSource::new("atual", StubBehavior::NetworkError);
        let fallback = StubSource::new("legado", StubBehavior::Figures(figures(100, 40, 60)));
        let service = FinancialSummaryService::new(primary.clone(), fallback.clone());

        let overview = service.resolve(42).await.unwrap();

        assert_eq!(overview.valor_total, Money::from(100));
        assert_eq!(overview.valor_pago, Money::from(40));
        assert_eq!(overview.valor_em_aberto, Money::from(60));
        assert_eq!(overview.origem, DataOrigin::Legado);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(fallback.call_count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_falls_back_when_primary_has_no_record() {
        let primary = StubSource::new("atual", StubBehavior::Empty);
        let fallback = StubSource::new("legado", StubBehavior::Figures(figures(250, 0, 250)));
        let service = FinancialSummaryService::new(primary, fallback);

        let overview = service.resolve(7).await.unwrap();

        assert_eq!(overview.valor_total, Money::from(250));
        assert_eq!(overview.origem, DataOrigin::Legado);
    }

    /// Validates the field-by-field merge of a partial primary answer.
    ///
    /// The primary record has a paid amount but no total; the legacy record
    /// has a total and a stale paid amount.
    ///
    /// Assertions:
    /// - Total is backfilled from legacy
    /// - Paid keeps the primary value (40, not 40 + 10)
    /// - Open is recomputed from the reconciled pair
    /// - Origin is marked as combined
    #[tokio::test]
    async fn test_resolve_merges_partial_primary_with_legacy() {
        let partial = FinancialFigures {
            valor_total: None,
            valor_pago: Some(Money::from(40)),
            valor_em_aberto: None,
            status: Some(TitleStatus::ParcialmentePaga),
        };
        let primary = StubSource::new("atual", StubBehavior::Figures(partial));
        let fallback = StubSource::new("legado", StubBehavior::Figures(figures(100, 10, 90)));
        let service = FinancialSummaryService::new(primary, fallback);

        let overview = service.resolve(42).await.unwrap();

        assert_eq!(overview.valor_total, Money::from(100));
        assert_eq!(overview.valor_pago, Money::from(40));
        assert_eq!(overview.valor_em_aberto, Money::from(60));
        assert_eq!(overview.status, TitleStatus::ParcialmentePaga);
        assert_eq!(overview.origem, DataOrigin::Combinado);
    }

    #[tokio::test]
    async fn test_resolve_both_sources_down_is_unavailable_not_error() {
        let primary = StubSource::new("atual", StubBehavior::NetworkError);
        let fallback = StubSource::new("legado", StubBehavior::NetworkError);
        let service = FinancialSummaryService::new(primary, fallback);

        let overview = service.resolve(42).await.unwrap();

        assert!(!overview.is_available());
        assert_eq!(overview.origem, DataOrigin::Indisponivel);
        assert_eq!(overview.valor_total, Money::ZERO);
    }

    /// Validates that auth failures bypass the fallback entirely.
    #[tokio::test]
    async fn test_resolve_auth_error_propagates_without_fallback() {
        let primary = StubSource::new("atual", StubBehavior::AuthError);
        let fallback = StubSource::new("legado", StubBehavior::Figures(figures(100, 0, 100)));
        let service = FinancialSummaryService::new(primary, fallback.clone());

        let err = service.resolve(42).await.unwrap_err();

        assert!(err.is_auth());
        assert_eq!(fallback.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_partial_primary_stands_alone_when_fallback_fails() {
        let partial = FinancialFigures {
            valor_total: None,
            valor_pago: Some(Money::from(30)),
            valor_em_aberto: None,
            status: None,
        };
        let primary = StubSource::new("atual", StubBehavior::Figures(partial));
        let fallback = StubSource::new("legado", StubBehavior::NetworkError);
        let service = FinancialSummaryService::new(primary, fallback);

        let overview = service.resolve(9).await.unwrap();

        assert_eq!(overview.valor_pago, Money::from(30));
        assert_eq!(overview.origem, DataOrigin::Atual);
    }

    #[test]
    fn test_merge_primary_fields_win() {
        let primary = FinancialFigures {
            valor_total: Some(Money::from(200)),
            valor_pago: None,
            valor_em_aberto: None,
            status: Some(TitleStatus::Aberta),
        };
        let fallback = figures(100, 50, 50);

        let merged = merge_figures(primary, fallback);

        assert_eq!(merged.valor_total, Some(Money::from(200)));
        assert_eq!(merged.valor_pago, Some(Money::from(50)));
        assert_eq!(merged.valor_em_aberto, Some(Money::from(50)));
        assert_eq!(merged.status, Some(TitleStatus::Aberta));
    }

    /// Validates that the open amount is always recomputed, never trusted.
    #[test]
    fn test_resolve_overview_recomputes_open_amount() {
        let mut input = figures(100, 40, 60);
        input.valor_em_aberto = Some(Money::from(999));

        let overview = resolve_overview(input, DataOrigin::Atual);

        assert_eq!(overview.valor_em_aberto, Money::from(60));
    }

    #[test]
    fn test_resolve_overview_derives_paid_from_open() {
        let input = FinancialFigures {
            valor_total: Some(Money::from(100)),
            valor_pago: None,
            valor_em_aberto: Some(Money::from(30)),
            status: None,
        };

        let overview = resolve_overview(input, DataOrigin::Legado);

        assert_eq!(overview.valor_pago, Money::from(70));
        assert_eq!(overview.valor_em_aberto, Money::from(30));
    }

    #[test]
    fn test_resolve_overview_never_goes_negative() {
        // overpayment reported by the backend
        let input = figures(100, 130, 0);

        let overview = resolve_overview(input, DataOrigin::Atual);

        assert_eq!(overview.valor_em_aberto, Money::ZERO);
        assert_eq!(overview.status, TitleStatus::Paga);
    }

    /// Validates the amount-based status derivation for sourceless records.
    ///
    /// Assertions:
    /// - Fully paid totals derive a settled status
    /// - Partial payments derive a partially-paid status
    /// - Untouched totals derive an open status
    #[test]
    fn test_resolve_overview_derives_status_from_amounts() {
        let paga = resolve_overview(figures(100, 100, 0), DataOrigin::Atual);
        let parcial = resolve_overview(figures(100, 40, 60), DataOrigin::Atual);
        let aberta = resolve_overview(figures(100, 0, 100), DataOrigin::Atual);

        assert_eq!(paga.status, TitleStatus::Paga);
        assert_eq!(parcial.status, TitleStatus::ParcialmentePaga);
        assert_eq!(aberta.status, TitleStatus::Aberta);
    }
}
