//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use groundwork_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use groundwork_testing::{ReducerTest, assertions, fixtures::Record, test_environment};
///
/// ReducerTest::new(WorkflowReducer::<Record>::new())
///     .with_env(test_environment())
///     .given_state(KeyedCollection::from_iter([Record::new("A", "draft")]))
///     .when_action(WorkflowAction::MoveToStage {
///         id: "A".to_string(),
///         status: "closed".to_string(),
///     })
///     .then_state(|state| {
///         assert_eq!(state.get_by_id(&"A".to_string()).unwrap().status, "closed");
///     })
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion<A>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone,
    A: Clone,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect<A>]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        // Execute reducer
        let effects: SmallVec<[Effect<A>; 4]> = self.reducer.reduce(&mut state, action, &env);

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        // Run effect assertions
        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use groundwork_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect does something.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects dispatch exactly `expected`, in order
    ///
    /// Nested sequential effects are flattened before comparing.
    ///
    /// # Panics
    ///
    /// Panics if the dispatched actions differ from `expected`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_dispatches<A>(effects: &[Effect<A>], expected: &[A])
    where
        A: std::fmt::Debug + PartialEq,
    {
        fn collect<'a, A>(effects: &'a [Effect<A>], out: &mut Vec<&'a A>) {
            for effect in effects {
                match effect {
                    Effect::None => {},
                    Effect::Dispatch(action) => out.push(&**action),
                    Effect::Sequential(nested) => collect(nested, out),
                }
            }
        }

        let mut dispatched = Vec::new();
        collect(effects, &mut dispatched);
        let expected: Vec<&A> = expected.iter().collect();
        assert_eq!(dispatched, expected, "Dispatched actions differ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Record, RecordPatch};
    use crate::mocks::{test_clock, test_environment};
    use groundwork_core::collection::KeyedCollection;
    use groundwork_core::entity::Decision;
    use groundwork_core::environment::Clock;
    use groundwork_core::workflow::{
        ApprovalAction, ApprovalReducer, WorkflowAction, WorkflowReducer,
    };

    fn id(value: &str) -> String {
        value.to_string()
    }

    fn seeded() -> KeyedCollection<Record> {
        [
            Record::new("A", "draft").titled("Excavation"),
            Record::new("B", "submitted").titled("Rebar"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_reducer_test_update() {
        ReducerTest::new(WorkflowReducer::<Record>::new())
            .with_env(test_environment())
            .given_state(seeded())
            .when_action(WorkflowAction::Update {
                id: id("A"),
                patch: RecordPatch::default().amount(1_500_i64),
            })
            .then_state(|state| {
                let record = state.get_by_id(&id("A")).unwrap();
                assert_eq!(record.amount, 1_500);
                assert_eq!(record.title, "Excavation");
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_reducer_test_decision() {
        ReducerTest::new(ApprovalReducer::<Record>::new())
            .with_env(test_environment())
            .given_state(seeded())
            .when_action(ApprovalAction::Decide {
                id: id("B"),
                decision: Decision::Reject,
                comment: Some("Missing drawings".to_string()),
            })
            .then_state(|state| {
                let record = state.get_by_id(&id("B")).unwrap();
                assert_eq!(record.status, "rejected");
                assert_eq!(record.comment.as_deref(), Some("Missing drawings"));
                assert_eq!(record.decided_at, Some(test_clock().now()));
            })
            .run();
    }

    #[test]
    fn test_assertions_no_effects() {
        assertions::assert_no_effects::<u8>(&[Effect::None]);
        assertions::assert_no_effects::<u8>(&[]);
    }

    #[test]
    fn test_assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::<u8>::None], 1);
        assertions::assert_effects_count::<u8>(&[], 0);
    }

    #[test]
    fn test_assertions_dispatches_flattens() {
        let effects = [
            Effect::dispatch(1_u8),
            Effect::chain(vec![Effect::None, Effect::dispatch(2_u8)]),
        ];
        assertions::assert_dispatches(&effects, &[1, 2]);
    }
}
