//! Port interfaces for the payment write side

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tropeiro_domain::{ClientId, OrderId, PaymentDraft, PaymentReceipt, Result};

/// Backend endpoint that registers a payment against a title.
///
/// Implementations must not retry: a timed-out registration may have been
/// applied, and a blind second attempt would double-settle the title.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn register(&self, draft: &PaymentDraft) -> Result<PaymentReceipt>;
}

/// Cache scopes a successful mutation must clear.
///
/// Synchronous on purpose: invalidation happens between the gateway answer
/// and the command response, and the in-memory implementation never blocks.
pub trait CacheInvalidator: Send + Sync {
    fn invalidate_order(&self, order_id: OrderId);
    fn invalidate_client(&self, client_id: ClientId);
    fn invalidate_dashboards(&self);
}

/// Invalidator that clears nothing, for wiring without a cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate_order(&self, _order_id: OrderId) {}

    fn invalidate_client(&self, _client_id: ClientId) {}

    fn invalidate_dashboards(&self) {}
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// User-facing notification emitted by command flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
