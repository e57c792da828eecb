//! # Pocket Store Testing
//!
//! Testing utilities and helpers for Pocket Store.
//!
//! This crate provides:
//! - Deterministic Environment implementations (`FixedClock`, `SequentialIds`)
//! - A snapshot recorder for store subscribers
//! - The `ReducerTest` Given-When-Then builder and effect assertions
//!
//! ## Example
//!
//! ```
//! use pocket_core::environment::{Clock, IdGenerator};
//! use pocket_testing::{Recorder, SequentialIds, test_clock};
//! use std::sync::Arc;
//!
//! let clock = test_clock();
//! assert_eq!(clock.now(), clock.now());
//!
//! let ids = SequentialIds::new();
//! assert_eq!(ids.next_id(), SequentialIds::nth(1));
//! assert_eq!(ids.next_id(), SequentialIds::nth(2));
//!
//! let recorder = Recorder::<u32>::new();
//! let listener = recorder.listener();
//! listener(&Arc::new(1));
//! listener(&Arc::new(2));
//! assert_eq!(recorder.values(), vec![1, 2]);
//! ```

use chrono::{DateTime, Utc};
use pocket_core::environment::{Clock, IdGenerator};


pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::Mutex;
    use std::sync::PoisonError;
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use pocket_testing::mocks::FixedClock;
    /// use pocket_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step every time it is read
    ///
    /// Useful when a test needs distinct, strictly increasing timestamps.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: chrono::Duration,
    }

    impl SteppingClock {
        /// Start at `start`, advancing by `step` per call
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: chrono::Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self.next.lock().unwrap_or_else(PoisonError::into_inner);
            let now = *next;
            *next = now + self.step;
            now
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable ids: `00000000-0000-0000-0000-000000000001`, `...002`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        counter: AtomicU64,
    }

    impl SequentialIds {
        /// Start counting from 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                counter: AtomicU64::new(0),
            }
        }

        /// The id the n-th call (1-based) returns
        #[must_use]
        pub fn nth(n: u64) -> Uuid {
            Uuid::from_u128(u128::from(n))
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> Uuid {
            let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            Self::nth(n)
        }
    }
}

/// Helpers for observing a store from tests
pub mod helpers {
    use std::sync::{Arc, Mutex, PoisonError};

    /// Records every snapshot delivered to a subscriber
    ///
    /// ```
    /// use pocket_testing::helpers::Recorder;
    /// use std::sync::Arc;
    ///
    /// let recorder = Recorder::<u32>::new();
    /// let listener = recorder.listener();
    /// listener(&Arc::new(7));
    /// assert_eq!(recorder.values(), vec![7]);
    /// ```
    #[derive(Debug)]
    pub struct Recorder<S> {
        seen: Arc<Mutex<Vec<Arc<S>>>>,
    }

    impl<S> Clone for Recorder<S> {
        fn clone(&self) -> Self {
            Self {
                seen: Arc::clone(&self.seen),
            }
        }
    }

    impl<S> Default for Recorder<S> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<S> Recorder<S> {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self {
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// A listener closure suitable for `Store::subscribe`
        pub fn listener(&self) -> impl Fn(&Arc<S>) + Send + Sync + 'static
        where
            S: Send + Sync + 'static,
        {
            let seen = Arc::clone(&self.seen);
            move |state: &Arc<S>| {
                seen.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(Arc::clone(state));
            }
        }

        /// Every snapshot received so far, oldest first
        #[must_use]
        pub fn snapshots(&self) -> Vec<Arc<S>> {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Cloned values of every snapshot received so far
        #[must_use]
        pub fn values(&self) -> Vec<S>
        where
            S: Clone,
        {
            self.snapshots().iter().map(|state| S::clone(state)).collect()
        }

        /// Number of notifications received
        #[must_use]
        pub fn len(&self) -> usize {
            self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
        }

        /// True if no notification has been received
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }
}

// Re-export commonly used items
pub use helpers::Recorder;
pub use mocks::{FixedClock, SequentialIds, SteppingClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_stepping_clock_advances() {
        let start = test_clock().now();
        let clock = SteppingClock::new(start, chrono::Duration::seconds(1));

        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + chrono::Duration::seconds(1));
    }

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), SequentialIds::nth(1));
        assert_eq!(ids.next_id(), SequentialIds::nth(2));
        assert_ne!(SequentialIds::nth(1), SequentialIds::nth(2));
    }

    #[test]
    fn test_recorder_collects_in_order() {
        let recorder = Recorder::<i32>::new();
        let listener = recorder.listener();

        listener(&Arc::new(1));
        listener(&Arc::new(2));

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.values(), vec![1, 2]);
    }
}
