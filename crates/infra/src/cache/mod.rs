//! Content-addressed query cache
//!
//! Read answers are cached under a [`QueryKey`]: the entity kind, the id the
//! query is scoped to (when it has one) and a fingerprint of the remaining
//! parameters. Two calls are the same cache entry exactly when kind, id and
//! fingerprint all match; there is no request-shape guessing.
//!
//! Writes do not update entries in place. A mutation invalidates whole
//! scopes through [`CacheInvalidator`] and the next read repopulates from
//! the backend. Entries also age out via TTL so a quiet screen never shows
//! data older than the configured window.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use moka::sync::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use tropeiro_common::time::{Clock, SystemClock};
use tropeiro_core::CacheInvalidator;
use tropeiro_domain::{CacheConfig, ClientId, ErpError, OrderId, Result};

use crate::errors::InfraError;

/// What a cached query is about. One variant per cacheable read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Single order lookup.
    Order,
    /// Order list for a client.
    Orders,
    /// Financial summary of an order.
    Summary,
    /// Installment list of an order.
    Installments,
    /// Receivable titles of an installment.
    Titles,
    /// Open receivables, optionally scoped to a client.
    OpenItems,
    /// Per-client open balance dashboard.
    ClientBalances,
    /// Per-order open balance dashboard.
    OrderBalances,
    /// Client registry list.
    Clients,
    /// Supplier registry list.
    Suppliers,
    /// Carrier registry list.
    Carriers,
}

/// Cache key: kind, scoping id and a fingerprint of the other parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: EntityKind,
    pub id: Option<i64>,
    pub fingerprint: String,
}

impl QueryKey {
    /// Key for a query with no parameters beyond its scoping id.
    #[must_use]
    pub fn bare(kind: EntityKind, id: Option<i64>) -> Self {
        Self { kind, id, fingerprint: String::new() }
    }

    /// Key for a parameterized query. The fingerprint is the canonical JSON
    /// encoding of the parameters, so equal parameters always address the
    /// same entry.
    pub fn with_params<P>(kind: EntityKind, id: Option<i64>, params: &P) -> Result<Self>
    where
        P: Serialize + ?Sized,
    {
        let fingerprint = serde_json::to_string(params).map_err(|err| {
            let infra: InfraError = err.into();
            ErpError::from(infra)
        })?;
        Ok(Self { kind, id, fingerprint })
    }

    fn scope(&self) -> (EntityKind, Option<i64>) {
        (self.kind, self.id)
    }
}

/// A cached payload plus the wall-clock moment it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEntry {
    pub payload: serde_json::Value,
    pub stored_at_ms: u64,
}

impl CachedEntry {
    /// Milliseconds elapsed since this entry was stored.
    #[must_use]
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at_ms)
    }
}

/// TTL-bound cache for backend read answers, with scope invalidation.
pub struct QueryCache {
    entries: Cache<QueryKey, CachedEntry>,
    scopes: DashMap<(EntityKind, Option<i64>), Vec<QueryKey>>,
    clock: Arc<dyn Clock>,
}

impl QueryCache {
    /// Build a cache on the system clock.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build a cache with an explicit clock, for pinned-time tests.
    #[must_use]
    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let entries = Cache::builder()
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .max_capacity(config.max_entries)
            .build();

        let cache = Self { entries, scopes: DashMap::new(), clock };
        cache.log_config(config);
        cache
    }

    fn log_config(&self, config: &CacheConfig) {
        debug!(
            ttl_secs = config.ttl_secs,
            max_entries = config.max_entries,
            "query cache configured"
        );
    }

    /// Typed lookup. Answers `None` on miss, expiry, or when the stored
    /// payload no longer decodes as `T` (the entry is dropped in that case).
    pub fn get<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let entry = self.entries.get(key)?;
        match serde_json::from_value(entry.payload) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(?key, error = %err, "dropping cache entry that no longer decodes");
                self.entries.invalidate(key);
                None
            }
        }
    }

    /// Raw lookup, keeping the storage timestamp for staleness display.
    pub fn entry(&self, key: &QueryKey) -> Option<CachedEntry> {
        self.entries.get(key)
    }

    /// Store a typed payload under the key.
    pub fn insert<T>(&self, key: QueryKey, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_value(value).map_err(|err| {
            let infra: InfraError = err.into();
            ErpError::from(infra)
        })?;
        let entry = CachedEntry { payload, stored_at_ms: self.clock.millis_since_epoch() };

        let mut keys = self.scopes.entry(key.scope()).or_default();
        if !keys.contains(&key) {
            keys.push(key.clone());
        }
        drop(keys);

        self.entries.insert(key, entry);
        Ok(())
    }

    /// Evict every entry stored under one (kind, id) scope.
    pub fn invalidate_scope(&self, kind: EntityKind, id: Option<i64>) {
        if let Some((_, keys)) = self.scopes.remove(&(kind, id)) {
            for key in &keys {
                self.entries.invalidate(key);
            }
            debug!(?kind, ?id, evicted = keys.len(), "cache scope invalidated");
        }
    }

    /// Evict every entry of a kind, across all ids.
    pub fn invalidate_kind(&self, kind: EntityKind) {
        let scoped: Vec<(EntityKind, Option<i64>)> = self
            .scopes
            .iter()
            .map(|entry| *entry.key())
            .filter(|(scoped_kind, _)| *scoped_kind == kind)
            .collect();
        for (kind, id) in scoped {
            self.invalidate_scope(kind, id);
        }
    }

    /// Drop everything, scope index included.
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.scopes.clear();
    }

    /// Number of live entries. Runs pending maintenance first so the count
    /// reflects recent inserts and invalidations.
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl CacheInvalidator for QueryCache {
    fn invalidate_order(&self, order_id: OrderId) {
        self.invalidate_scope(EntityKind::Summary, Some(order_id));
        self.invalidate_scope(EntityKind::Installments, Some(order_id));
        self.invalidate_scope(EntityKind::Order, Some(order_id));
        // Titles are keyed by installment id and order lists by client id,
        // so a settled payment sweeps both kinds outright.
        self.invalidate_kind(EntityKind::Titles);
        self.invalidate_kind(EntityKind::Orders);
        debug!(order_id, "order scopes invalidated");
    }

    fn invalidate_client(&self, client_id: ClientId) {
        self.invalidate_scope(EntityKind::OpenItems, Some(client_id));
        self.invalidate_scope(EntityKind::ClientBalances, Some(client_id));
        self.invalidate_scope(EntityKind::Orders, Some(client_id));
        debug!(client_id, "client scopes invalidated");
    }

    fn invalidate_dashboards(&self) {
        self.invalidate_kind(EntityKind::ClientBalances);
        self.invalidate_kind(EntityKind::OrderBalances);
        self.invalidate_kind(EntityKind::OpenItems);
        debug!("dashboard kinds invalidated");
    }
}
