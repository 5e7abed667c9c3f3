//! # Groundwork Runtime
//!
//! Runtime implementation for the Groundwork ERP data core.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, reducer and environment; processes actions
//! - **Effect Drain**: Runs returned effects and feeds dispatched actions
//!   back to the reducer until nothing is left
//!
//! Everything runs synchronously on the caller's thread. `send` returns once
//! the action and every effect it produced have been fully processed.
//!
//! ## Example
//!
//! ```ignore
//! use groundwork_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use groundwork_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// Missing entities are never errors; the only failure is a runaway
    /// chain of dispatched effects.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept dispatching actions past the configured depth
        ///
        /// State changes made before the limit was hit are kept.
        #[error("Effect dispatch exceeded maximum depth of {max_depth}")]
        DispatchDepthExceeded {
            /// The configured limit
            max_depth: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::default().with_max_dispatch_depth(8);
///
/// let store = Store::with_config(state, reducer, env, config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum length of a chain of dispatched actions started by one `send`
    pub max_dispatch_depth: usize,
}

impl StoreConfig {
    /// Default bound on effect feedback chains
    pub const DEFAULT_MAX_DISPATCH_DEPTH: usize = 32;

    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_dispatch_depth: usize) -> Self {
        Self { max_dispatch_depth }
    }

    /// Set the maximum dispatch depth
    #[must_use]
    pub const fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DISPATCH_DEPTH)
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Effect, Reducer, StoreConfig, StoreError, VecDeque};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned; mutated only through `send`)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut store = Store::new(
    ///     KeyedCollection::from_iter(seed),
    ///     WorkflowReducer::new(),
    ///     WorkflowEnvironment::new(Arc::new(SystemClock)),
    /// );
    ///
    /// store.send(WorkflowAction::MoveToStage { id, status })?;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
        actions_processed: u64,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (business logic)
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        ///
        /// # Arguments
        ///
        /// - `initial_state`: Initial state value
        /// - `reducer`: The reducer function
        /// - `environment`: Dependencies injected into the reducer
        /// - `config`: Runtime limits
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
                actions_processed: 0,
            }
        }

        /// Send an action to the store
        ///
        /// This is the primary way to interact with the store:
        /// 1. Calls reducer with (state, action, environment)
        /// 2. Drains returned effects in order
        /// 3. Dispatched actions re-enter the reducer (feedback loop)
        ///
        /// Returns after every effect produced by `action`, directly or
        /// through dispatched actions, has been processed.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::DispatchDepthExceeded`] if a chain of
        /// dispatched actions grows beyond `max_dispatch_depth`. The actions
        /// reduced before that point stay applied.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<(), StoreError> {
            tracing::debug!(?action, "Processing action");

            let mut queue: VecDeque<(Effect<A>, usize)> = VecDeque::new();
            for effect in self.reduce(action) {
                queue.push_back((effect, 1));
            }

            while let Some((effect, depth)) = queue.pop_front() {
                match effect {
                    Effect::None => {},
                    Effect::Sequential(effects) => {
                        queue.extend(effects.into_iter().map(|effect| (effect, depth)));
                    },
                    Effect::Dispatch(action) => {
                        if depth > self.config.max_dispatch_depth {
                            tracing::warn!(
                                depth,
                                max_depth = self.config.max_dispatch_depth,
                                "Dispatch depth exceeded, dropping remaining effects"
                            );
                            metrics::counter!("store.dispatch_depth_exceeded").increment(1);
                            return Err(StoreError::DispatchDepthExceeded {
                                max_depth: self.config.max_dispatch_depth,
                            });
                        }

                        tracing::debug!(?action, depth, "Dispatching effect action");
                        metrics::counter!("store.effects.dispatched").increment(1);
                        for effect in self.reduce(*action) {
                            queue.push_back((effect, depth + 1));
                        }
                    },
                }
            }

            Ok(())
        }

        fn reduce(&mut self, action: A) -> groundwork_core::SmallVec<[Effect<A>; 4]> {
            metrics::counter!("store.actions.total").increment(1);
            self.actions_processed += 1;

            let span = tracing::trace_span!("reducer_execution");
            let _enter = span.enter();

            let start = std::time::Instant::now();
            let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            tracing::trace!("Reducer completed, returned {} effects", effects.len());
            effects
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Number of reducer invocations so far, dispatched actions included
        #[must_use]
        pub const fn actions_processed(&self) -> u64 {
            self.actions_processed
        }

        /// The environment injected into the reducer
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Consume the store and return its state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }
    }
}

// Re-export for convenience
pub use store::Store;
