//! Application context - dependency injection
//!
//! [`AppContext`] owns everything the commands touch: resolved
//! configuration, the query cache, the ERP clients and the services wired
//! over them. Production wiring comes from [`AppContext::new`];
//! [`AppContextBuilder`] lets tests swap any port for a double while
//! keeping the rest of the graph real.

use std::sync::Arc;

use tropeiro_common::{Clock, SystemClock};
use tropeiro_core::{
    AggregationService, CacheInvalidator, FinancialSummaryService, Notifier, OrdersGateway,
    PaymentGateway, PaymentService, ReceivablesGateway, RegistryGateway, SummarySource,
};
use tropeiro_domain::{Config, Result};
use tropeiro_infra::{
    ErpClient, ErpClientConfig, FinancialApi, LegacyFinancialApi, MemoryTokenStore, OrdersApi,
    PaymentsApi, QueryCache, RegistryApi, ReportsApi, TokenProvider,
};

use crate::utils::notify::TracingNotifier;

/// Shared clock handle.
pub type DynClock = Arc<dyn Clock>;
/// Notification sink handle.
pub type DynNotifier = Arc<dyn Notifier>;
/// Summary source handle (one API generation).
pub type DynSummarySource = Arc<dyn SummarySource>;
/// Receivables read and mutation port handle.
pub type DynReceivables = Arc<dyn ReceivablesGateway>;
/// Payment registration port handle.
pub type DynPaymentGateway = Arc<dyn PaymentGateway>;
/// Orders port handle.
pub type DynOrders = Arc<dyn OrdersGateway>;
/// Registry lookup port handle.
pub type DynRegistry = Arc<dyn RegistryGateway>;

/// Shared application state for the command layer.
///
/// Cheap to share behind an `Arc`; every field is either a handle or a
/// service over handles.
pub struct AppContext {
    /// Resolved configuration the context was built from.
    pub config: Config,
    /// Clock behind every age and overdue computation.
    pub clock: DynClock,
    /// Query cache shared by read commands and invalidation paths.
    pub cache: Arc<QueryCache>,
    /// Session token store. The shell writes to it at login.
    pub tokens: Arc<MemoryTokenStore>,
    /// Retrying ERP client; also serves the connectivity probe.
    pub erp: Arc<ErpClient>,
    /// Dual-source financial summary resolution.
    pub summaries: FinancialSummaryService,
    /// Dashboard aggregation over open receivables.
    pub aggregation: AggregationService,
    /// Payment registration with validation and cache fanout.
    pub payments: PaymentService,
    /// Installments, titles and open-items reads; title cancellation.
    pub receivables: DynReceivables,
    /// Order reads and payment-term changes.
    pub orders: DynOrders,
    /// Client, supplier and carrier lookups.
    pub registry: DynRegistry,
    /// Report blob downloads.
    pub reports: ReportsApi,
    /// Sink for user-facing notifications.
    pub notifier: DynNotifier,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").field("config", &self.config).finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build a production context from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`tropeiro_domain::ErpError::Config`] when the configured
    /// base URL does not parse as an http(s) URL.
    pub fn new(config: Config) -> Result<Self> {
        AppContextBuilder::new(config).build()
    }

    /// Resolve configuration (environment, config file, defaults) and
    /// build.
    ///
    /// # Errors
    ///
    /// Propagates loader failures and the same wiring errors as
    /// [`AppContext::new`].
    pub fn from_env() -> Result<Self> {
        let config = tropeiro_infra::config::load()?;
        Self::new(config)
    }

    /// Start a builder for a context with swapped ports.
    #[must_use]
    pub fn builder(config: Config) -> AppContextBuilder {
        AppContextBuilder::new(config)
    }
}

/// Builder over [`AppContext`] with per-port overrides.
///
/// Every port not overridden gets the production HTTP adapter.
pub struct AppContextBuilder {
    config: Config,
    clock: Option<DynClock>,
    notifier: Option<DynNotifier>,
    summary_primary: Option<DynSummarySource>,
    summary_fallback: Option<DynSummarySource>,
    receivables: Option<DynReceivables>,
    payment_gateway: Option<DynPaymentGateway>,
    orders: Option<DynOrders>,
    registry: Option<DynRegistry>,
}

impl AppContextBuilder {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            clock: None,
            notifier: None,
            summary_primary: None,
            summary_fallback: None,
            receivables: None,
            payment_gateway: None,
            orders: None,
            registry: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: DynClock) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: DynNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn with_summary_primary(mut self, source: DynSummarySource) -> Self {
        self.summary_primary = Some(source);
        self
    }

    #[must_use]
    pub fn with_summary_fallback(mut self, source: DynSummarySource) -> Self {
        self.summary_fallback = Some(source);
        self
    }

    #[must_use]
    pub fn with_receivables(mut self, gateway: DynReceivables) -> Self {
        self.receivables = Some(gateway);
        self
    }

    #[must_use]
    pub fn with_payment_gateway(mut self, gateway: DynPaymentGateway) -> Self {
        self.payment_gateway = Some(gateway);
        self
    }

    #[must_use]
    pub fn with_orders(mut self, gateway: DynOrders) -> Self {
        self.orders = Some(gateway);
        self
    }

    #[must_use]
    pub fn with_registry(mut self, gateway: DynRegistry) -> Self {
        self.registry = Some(gateway);
        self
    }

    /// Wire the context.
    ///
    /// # Errors
    ///
    /// Returns [`tropeiro_domain::ErpError::Config`] when the base URL is
    /// invalid.
    pub fn build(self) -> Result<AppContext> {
        let Self {
            config,
            clock,
            notifier,
            summary_primary,
            summary_fallback,
            receivables,
            payment_gateway,
            orders,
            registry,
        } = self;

        let clock = clock.unwrap_or_else(|| Arc::new(SystemClock));
        let notifier = notifier.unwrap_or_else(|| Arc::new(TracingNotifier));

        // Cache and session state shared by every adapter.
        let cache = Arc::new(QueryCache::with_clock(&config.cache, Arc::clone(&clock)));
        let tokens = Arc::new(MemoryTokenStore::new());
        let token_provider: Arc<dyn TokenProvider> = tokens.clone();

        // Two clients over one session: idempotent reads retry, financial
        // summaries and payment posts run single-attempt.
        let erp = Arc::new(ErpClient::new(
            ErpClientConfig::from_api_config(&config.api),
            Arc::clone(&token_provider),
        )?);
        let erp_once = Arc::new(ErpClient::new(
            ErpClientConfig::from_api_config(&config.api).no_retry(),
            token_provider,
        )?);

        // Ports: production adapters unless the builder swapped one out.
        let financial = Arc::new(FinancialApi::new(Arc::clone(&erp_once)));
        let primary = summary_primary.unwrap_or_else(|| financial.clone() as DynSummarySource);
        let fallback = summary_fallback
            .unwrap_or_else(|| Arc::new(LegacyFinancialApi::new(Arc::clone(&erp_once))));
        let receivables = receivables.unwrap_or_else(|| financial.clone() as DynReceivables);
        let payment_gateway =
            payment_gateway.unwrap_or_else(|| Arc::new(PaymentsApi::new(Arc::clone(&erp_once))));
        let orders = orders.unwrap_or_else(|| Arc::new(OrdersApi::new(Arc::clone(&erp))));
        let registry = registry.unwrap_or_else(|| Arc::new(RegistryApi::new(Arc::clone(&erp))));
        let reports = ReportsApi::new(Arc::clone(&erp));

        // Services over the ports.
        let summaries = FinancialSummaryService::new(primary, fallback);
        let aggregation = AggregationService::new(Arc::clone(&receivables), Arc::clone(&clock));
        let invalidator: Arc<dyn CacheInvalidator> = cache.clone();
        let payments = PaymentService::new(payment_gateway, invalidator, Arc::clone(&notifier));

        Ok(AppContext {
            config,
            clock,
            cache,
            tokens,
            erp,
            summaries,
            aggregation,
            payments,
            receivables,
            orders,
            registry,
            reports,
            notifier,
        })
    }
}
