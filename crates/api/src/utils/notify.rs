//! Notification sinks

use tracing::{info, warn};
use tropeiro_core::{Notification, NotificationKind, Notifier};

/// Notifier that forwards user-facing messages to the log.
///
/// The default sink for headless runs; desktop shells replace it with a
/// toast bridge through the context builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(message = %notification.message, "user_notification");
            }
            NotificationKind::Error => {
                warn!(message = %notification.message, "user_notification");
            }
        }
    }
}
