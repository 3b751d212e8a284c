//! Time abstraction for testability
//!
//! Provides a trait-based approach to time operations that allows for
//! deterministic testing without relying on actual time passage. Receivables
//! math (overdue days, cache staleness) always goes through a [`Clock`] so
//! tests can pin the calendar.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use tropeiro_common::time::{Clock, MockClock, SystemClock};
//!
//! // Use system clock in production
//! let clock = SystemClock;
//! let now = clock.now();
//!
//! // Use mock clock in tests
//! let mock = MockClock::new();
//! let start = mock.now();
//! mock.advance(Duration::from_secs(5));
//! let end = mock.now();
//! assert_eq!(end.duration_since(start), Duration::from_secs(5));
//! ```

// Allow missing panics docs for time utilities - the unwrap_or_default usage is intentional
// and handles edge cases gracefully
#![allow(clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate, Utc};

/// Trait for time operations to enable testing
///
/// This trait provides an abstraction over time operations, allowing code
/// to work with either real system time or mocked time for testing.
pub trait Clock: Send + Sync {
    /// Get current instant (monotonic time)
    ///
    /// Returns a monotonic timestamp suitable for measuring durations.
    fn now(&self) -> Instant;

    /// Get current system time (wall clock)
    ///
    /// Returns the current wall clock time.
    fn system_time(&self) -> SystemTime;

    /// Get milliseconds since UNIX epoch
    ///
    /// Convenience method for getting the current time as milliseconds
    /// since the UNIX epoch (January 1, 1970).
    fn millis_since_epoch(&self) -> u64 {
        self.system_time().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }

    /// Get today's calendar date in UTC
    ///
    /// Overdue-day calculations key off this so a mocked wall clock pins the
    /// calendar as well.
    fn today_utc(&self) -> NaiveDate {
        DateTime::<Utc>::from(self.system_time()).date_naive()
    }
}

/// Real system clock implementation
///
/// This implementation uses the actual system clock for time operations.
/// Use this in production code.
///
/// # Examples
///
/// ```
/// use tropeiro_common::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// println!("Current time: {:?}", now);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Mock clock for deterministic testing
///
/// This implementation allows you to control time in tests, making them
/// deterministic and fast. You can advance time manually without actually
/// waiting, or pin the clock to a fixed calendar date.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tropeiro_common::time::{Clock, MockClock};
///
/// let clock = MockClock::new();
/// let start = clock.now();
///
/// // Simulate 5 seconds passing
/// clock.advance(Duration::from_secs(5));
///
/// let end = clock.now();
/// assert_eq!(end.duration_since(start), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    elapsed: Arc<Mutex<Duration>>,
    base_system_time: SystemTime,
}

impl MockClock {
    /// Create a new mock clock
    ///
    /// The clock starts at the current real time but can be advanced
    /// manually without real time passing.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
            base_system_time: SystemTime::now(),
        }
    }

    /// Create a mock clock pinned to noon UTC of the given date
    ///
    /// Noon keeps `today_utc` stable under small advances in either
    /// direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    ///
    /// use tropeiro_common::time::{Clock, MockClock};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let clock = MockClock::at_date(date);
    /// assert_eq!(clock.today_utc(), date);
    /// ```
    pub fn at_date(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        let secs = u64::try_from(noon.timestamp()).unwrap_or_default();
        Self {
            start: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
            base_system_time: UNIX_EPOCH + Duration::from_secs(secs),
        }
    }

    /// Advance the mock clock by a duration
    ///
    /// This simulates time passing without actually waiting.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use tropeiro_common::time::MockClock;
    ///
    /// let clock = MockClock::new();
    /// clock.advance(Duration::from_secs(10));
    /// assert_eq!(clock.elapsed(), Duration::from_secs(10));
    /// ```
    pub fn advance(&self, duration: Duration) {
        // Test utility: panic on poisoned mutex to fail tests early
        let mut elapsed = self.elapsed.lock().expect("mutex poisoned");
        *elapsed += duration;
    }

    /// Set the mock clock to a specific elapsed time
    ///
    /// This sets the clock to an absolute elapsed time, replacing
    /// any previous elapsed time.
    pub fn set_elapsed(&self, duration: Duration) {
        // Test utility: panic on poisoned mutex to fail tests early
        let mut elapsed = self.elapsed.lock().expect("mutex poisoned");
        *elapsed = duration;
    }

    /// Get the current elapsed time
    ///
    /// Returns how much time has been simulated since the clock was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        // Test utility: panic on poisoned mutex to fail tests early
        *self.elapsed.lock().expect("mutex poisoned")
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        // Test utility: panic on poisoned mutex to fail tests early
        self.start + *self.elapsed.lock().expect("mutex poisoned")
    }

    fn system_time(&self) -> SystemTime {
        // Test utility: panic on poisoned mutex to fail tests early
        self.base_system_time + *self.elapsed.lock().expect("mutex poisoned")
    }
}
