//! # Groundwork Testing
//!
//! Testing utilities and helpers for the Groundwork ERP data core.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - A generic `Record` fixture entity with a free-form status
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```ignore
//! use groundwork_testing::{ReducerTest, fixtures::Record, test_environment};
//!
//! ReducerTest::new(ApprovalReducer::<Record>::new())
//!     .with_env(test_environment())
//!     .given_state(KeyedCollection::from_iter([Record::new("A", "draft")]))
//!     .when_action(ApprovalAction::Decide {
//!         id: "A".to_string(),
//!         decision: Decision::Approve,
//!         comment: None,
//!     })
//!     .then_state(|state| {
//!         assert_eq!(state.get_by_id(&"A".to_string()).unwrap().status, "approved");
//!     })
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use groundwork_core::environment::Clock;

pub mod fixtures;
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use groundwork_core::workflow::WorkflowEnvironment;
    use std::sync::Arc;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use groundwork_testing::mocks::FixedClock;
    /// use groundwork_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
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

    /// Workflow environment backed by [`test_clock`]
    #[must_use]
    pub fn test_environment() -> WorkflowEnvironment {
        WorkflowEnvironment::new(Arc::new(test_clock()))
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use crate::fixtures::{Record, RecordPatch};
    use proptest::option;
    use proptest::prelude::*;

    /// Statuses used by generated records
    pub const STATUSES: &[&str] = &["draft", "submitted", "pending", "approved", "rejected", "closed"];

    /// Any status from [`STATUSES`]
    pub fn status() -> impl Strategy<Value = String> {
        proptest::sample::select(STATUSES).prop_map(str::to_string)
    }

    fn title() -> impl Strategy<Value = String> {
        "[A-Za-z ]{0,16}"
    }

    /// Records with unique ids `R-0`, `R-1`, ... in order
    pub fn unique_records(max_len: usize) -> impl Strategy<Value = Vec<Record>> {
        proptest::collection::vec((title(), any::<i64>(), status()), 0..max_len).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(index, (title, amount, status))| Record {
                    id: format!("R-{index}"),
                    title,
                    amount,
                    status,
                    comment: None,
                    decided_at: None,
                })
                .collect()
        })
    }

    /// Patches touching any subset of title, amount and status
    pub fn record_patch() -> impl Strategy<Value = RecordPatch> {
        (option::of(title()), option::of(any::<i64>()), option::of(status())).prop_map(
            |(title, amount, status)| RecordPatch {
                title,
                amount,
                status,
                comment: None,
                decided_at: None,
            },
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock, test_environment};
pub use reducer_test::{ReducerTest, assertions};
