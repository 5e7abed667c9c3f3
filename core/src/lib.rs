//! # Groundwork Core
//!
//! Core traits and types for the Groundwork ERP data core.
//!
//! This crate provides the abstractions every collection in the system is
//! built from: keyed entity collections with snapshot semantics, reducers
//! that describe how actions change them, and the status workflow shared by
//! projects, tenders, contracts, payment requests and the rest.
//!
//! ## Core Concepts
//!
//! - **Entity**: A flat record identified by a unique id
//! - **Snapshot**: The immutable contents of a collection at one instant
//! - **Action**: All possible inputs to a reducer (add, update, transitions)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Follow-up work described as a value, run by the store
//! - **Environment**: Injected dependencies (the clock)
//!
//! ## Example
//!
//! ```ignore
//! use groundwork_core::collection::KeyedCollection;
//! use groundwork_core::workflow::{WorkflowAction, WorkflowReducer};
//!
//! let mut projects = KeyedCollection::from_iter(seed);
//! let effects = WorkflowReducer::new().reduce(
//!     &mut projects,
//!     WorkflowAction::MoveToStage { id, status: ProjectStatus::Active },
//!     &env,
//! );
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};

pub mod collection;
pub mod entity;
pub mod workflow;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for ProjectReducer {
    ///     type State = KeyedCollection<Project>;
    ///     type Action = WorkflowAction<Project>;
    ///     type Environment = WorkflowEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut Self::State,
    ///         action: Self::Action,
    ///         env: &Self::Environment,
    ///     ) -> SmallVec<[Effect<Self::Action>; 4]> {
    ///         match action {
    ///             WorkflowAction::Add(project) => {
    ///                 state.add(project);
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the store
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Follow-up work descriptions
///
/// Effects are values, not execution. The store drains them after the
/// reducer returns, before `send` completes.
pub mod effect {
    /// Effect type - describes follow-up work for the store
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Debug, Clone, PartialEq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer
        Dispatch(Box<Action>),

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> Effect<Action> {
        /// Wrap an action for dispatch
        #[must_use]
        pub fn dispatch(action: Action) -> Effect<Action> {
            Effect::Dispatch(Box::new(action))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns true if this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Dispatch(_) => false,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
            }
        }

        /// Transform the action type carried by this effect
        ///
        /// Used when a parent reducer embeds a child reducer and lifts the
        /// child's effects into its own action type.
        #[must_use]
        pub fn map<B, F>(self, f: F) -> Effect<B>
        where
            F: Fn(Action) -> B + Copy,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Dispatch(action) => Effect::Dispatch(Box::new(f(*action))),
                Effect::Sequential(effects) => {
                    Effect::Sequential(effects.into_iter().map(|e| e.map(f)).collect())
                },
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
