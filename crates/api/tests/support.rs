use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tropeiro_app::context::AppContextBuilder;
use tropeiro_app::AppContext;
use tropeiro_common::MockClock;
use tropeiro_core::{Notification, Notifier};
use tropeiro_domain::Config;
use wiremock::MockServer;

/// Context wired to a mock backend, plus the hooks tests assert on.
pub struct TestHarness {
    /// Context under test.
    pub ctx: AppContext,
    /// Mock ERP backend; expectations are verified when it drops.
    pub server: MockServer,
    /// Injected clock, pinned so overdue math is deterministic.
    pub clock: Arc<MockClock>,
    /// Recorded user-facing notifications.
    pub notifications: Arc<CollectingNotifier>,
}

/// Notifier that records instead of logging.
#[derive(Default)]
pub struct CollectingNotifier(Mutex<Vec<Notification>>);

impl CollectingNotifier {
    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        self.0.lock().expect("notifier mutex poisoned").drain(..).collect()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notification: Notification) {
        self.0.lock().expect("notifier mutex poisoned").push(notification);
    }
}

/// Mock backend plus a context pointed at it, with today pinned to
/// 2024-03-15.
pub async fn setup() -> TestHarness {
    setup_at(NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")).await
}

/// Same as [`setup`] with the clock pinned to a chosen date.
pub async fn setup_at(today: NaiveDate) -> TestHarness {
    let server = MockServer::start().await;
    let clock = Arc::new(MockClock::at_date(today));
    let notifications = Arc::new(CollectingNotifier::default());

    let mut config = Config::default();
    config.api.base_url = server.uri();

    let ctx = AppContextBuilder::new(config)
        .with_clock(clock.clone())
        .with_notifier(notifications.clone())
        .build()
        .expect("context wires against the mock server");

    TestHarness { ctx, server, clock, notifications }
}
