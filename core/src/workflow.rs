//! Status workflow reducers shared by every entity collection.
//!
//! [`WorkflowReducer`] applies plain collection changes (add, update, remove)
//! and stage moves to a [`KeyedCollection`]. [`ApprovalReducer`] embeds it and
//! adds approve / reject decisions for [`Approvable`] entities.
//!
//! Stage moves and decisions are label assignments. Any status may follow any
//! other; nothing here consults the current status before overwriting it.

use crate::collection::KeyedCollection;
use crate::effect::Effect;
use crate::entity::{Approvable, Decision, Stateful};
use crate::environment::Clock;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::marker::PhantomData;
use std::sync::Arc;

/// Collection changes and stage moves for a stateful entity
#[derive(Clone, Debug, PartialEq)]
pub enum WorkflowAction<T: Stateful> {
    /// Append an entity
    Add(T),

    /// Shallow-merge a patch onto an entity
    Update {
        /// Entity to update
        id: T::Id,
        /// Fields to overwrite
        patch: T::Patch,
    },

    /// Remove an entity
    Remove {
        /// Entity to remove
        id: T::Id,
    },

    /// Set the status to any value
    MoveToStage {
        /// Entity to move
        id: T::Id,
        /// New status
        status: T::Status,
    },
}

/// Workflow actions plus approve / reject decisions
#[derive(Clone, Debug, PartialEq)]
pub enum ApprovalAction<T: Approvable> {
    /// Plain workflow action
    Workflow(WorkflowAction<T>),

    /// Approve or reject an entity
    Decide {
        /// Entity being decided
        id: T::Id,
        /// Approve or reject
        decision: Decision,
        /// Optional reviewer comment
        comment: Option<String>,
    },
}

impl<T: Approvable> From<WorkflowAction<T>> for ApprovalAction<T> {
    fn from(action: WorkflowAction<T>) -> Self {
        Self::Workflow(action)
    }
}

/// Environment dependencies for workflow reducers
#[derive(Clone)]
pub struct WorkflowEnvironment {
    /// Clock for decision timestamps
    pub clock: Arc<dyn Clock>,
}

impl WorkflowEnvironment {
    /// Creates a new `WorkflowEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl std::fmt::Debug for WorkflowEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for [`WorkflowAction`]
pub struct WorkflowReducer<T> {
    _entity: PhantomData<fn() -> T>,
}

impl<T> WorkflowReducer<T> {
    /// Creates a new `WorkflowReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<T> Default for WorkflowReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for WorkflowReducer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for WorkflowReducer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WorkflowReducer")
    }
}

impl<T: Stateful> Reducer for WorkflowReducer<T> {
    type State = KeyedCollection<T>;
    type Action = WorkflowAction<T>;
    type Environment = WorkflowEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            WorkflowAction::Add(item) => state.add(item),
            WorkflowAction::Update { id, patch } => {
                state.update(&id, &patch);
            },
            WorkflowAction::Remove { id } => {
                state.remove(&id);
            },
            WorkflowAction::MoveToStage { id, status } => {
                state.update_with(&id, |item| item.set_status(status.clone()));
            },
        }

        SmallVec::new()
    }
}

/// Reducer for [`ApprovalAction`]
pub struct ApprovalReducer<T> {
    workflow: WorkflowReducer<T>,
}

impl<T> ApprovalReducer<T> {
    /// Creates a new `ApprovalReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            workflow: WorkflowReducer::new(),
        }
    }
}

impl<T> Default for ApprovalReducer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ApprovalReducer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ApprovalReducer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApprovalReducer")
    }
}

impl<T: Approvable> Reducer for ApprovalReducer<T> {
    type State = KeyedCollection<T>;
    type Action = ApprovalAction<T>;
    type Environment = WorkflowEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ApprovalAction::Workflow(action) => self
                .workflow
                .reduce(state, action, env)
                .into_iter()
                .map(|effect| effect.map(ApprovalAction::Workflow))
                .collect(),
            ApprovalAction::Decide {
                id,
                decision,
                comment,
            } => {
                let decided_at = env.clock.now();
                state.update_with(&id, |item| {
                    item.set_status(decision.status::<T>());
                    item.record_decision(comment.clone(), decided_at);
                });
                SmallVec::new()
            },
        }
    }
}
