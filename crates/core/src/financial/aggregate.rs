//! Open-receivables aggregation
//!
//! Pure folds over flattened open rows. Buckets are keyed by client or order
//! id; the overdue day count is a maximum across the bucket, never a sum.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use tropeiro_common::time::Clock;
use tropeiro_domain::{
    ClientBalance, ClientId, Money, OpenItem, OrderBalance, OrderId, Result,
};

use super::ports::ReceivablesGateway;

/// Whole days between the due date and `today`, clamped at zero.
///
/// Rows due today or in the future are not overdue.
#[must_use]
pub fn days_overdue(due: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(due).num_days().max(0)
}

/// Fold open rows into per-client buckets.
///
/// Settled and cancelled rows contribute nothing. Output is sorted by open
/// total descending, ties broken by client id, so dashboards render
/// deterministically.
#[must_use]
pub fn client_balances(items: &[OpenItem], today: NaiveDate) -> Vec<ClientBalance> {
    let mut buckets: HashMap<ClientId, ClientBalance> = HashMap::new();
    for item in items {
        if !item.status.counts_as_open() {
            continue;
        }
        let bucket = buckets.entry(item.cliente.id).or_insert_with(|| ClientBalance {
            cliente_id: item.cliente.id,
            cliente_nome: item.cliente.nome.clone(),
            total_aberto: Money::ZERO,
            parcelas_aberto: 0,
            maior_atraso_dias: 0,
        });
        bucket.total_aberto += item.valor_em_aberto();
        bucket.parcelas_aberto += 1;
        bucket.maior_atraso_dias = bucket
            .maior_atraso_dias
            .max(days_overdue(item.vencimento, today));
    }

    let mut balances: Vec<ClientBalance> = buckets.into_values().collect();
    balances.sort_by(|a, b| {
        b.total_aberto
            .cmp(&a.total_aberto)
            .then(a.cliente_id.cmp(&b.cliente_id))
    });
    balances
}

/// Fold open rows into per-order buckets.
///
/// Rows without an order id (standalone titles) are skipped; they have no
/// order to be attributed to. Same ordering contract as [`client_balances`].
#[must_use]
pub fn order_balances(items: &[OpenItem], today: NaiveDate) -> Vec<OrderBalance> {
    let mut buckets: HashMap<OrderId, OrderBalance> = HashMap::new();
    for item in items {
        if !item.status.counts_as_open() {
            continue;
        }
        let Some(pedido_id) = item.pedido_id else {
            continue;
        };
        let bucket = buckets.entry(pedido_id).or_insert_with(|| OrderBalance {
            pedido_id,
            total_aberto: Money::ZERO,
            parcelas_aberto: 0,
            maior_atraso_dias: 0,
        });
        bucket.total_aberto += item.valor_em_aberto();
        bucket.parcelas_aberto += 1;
        bucket.maior_atraso_dias = bucket
            .maior_atraso_dias
            .max(days_overdue(item.vencimento, today));
    }

    let mut balances: Vec<OrderBalance> = buckets.into_values().collect();
    balances.sort_by(|a, b| {
        b.total_aberto
            .cmp(&a.total_aberto)
            .then(a.pedido_id.cmp(&b.pedido_id))
    });
    balances
}

/// Builds the dashboard aggregates from the receivables gateway.
pub struct AggregationService {
    gateway: Arc<dyn ReceivablesGateway>,
    clock: Arc<dyn Clock>,
}

impl AggregationService {
    pub fn new(gateway: Arc<dyn ReceivablesGateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    /// Per-client open balances, optionally scoped to one client.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures untouched.
    pub async fn client_balances(&self, client_id: Option<ClientId>) -> Result<Vec<ClientBalance>> {
        let items = self.gateway.open_items(client_id).await?;
        debug!(rows = items.len(), "folding open rows into client buckets");
        Ok(client_balances(&items, self.clock.today_utc()))
    }

    /// Per-order open balances across all clients.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures untouched.
    pub async fn order_balances(&self) -> Result<Vec<OrderBalance>> {
        let items = self.gateway.open_items(None).await?;
        debug!(rows = items.len(), "folding open rows into order buckets");
        Ok(order_balances(&items, self.clock.today_utc()))
    }
}
