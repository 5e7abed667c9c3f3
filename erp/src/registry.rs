//! Domain registries: one store per entity collection.
//!
//! A [`Registry`] wraps a runtime [`Store`] whose state is a
//! [`KeyedCollection`]. Every operation is sent to the store as an action,
//! so reducers stay the only code that mutates a collection. Reads go
//! through the current [`Snapshot`] and are recomputed on every call.

use crate::entities::{
    Approval, Contract, DesignRequest, Employee, PaymentRequest, Project, Tender, WorkPackage,
    WorkPackageAction, WorkPackageReducer,
};
use crate::ids::WorkPackageId;
use groundwork_core::collection::{KeyedCollection, Snapshot};
use groundwork_core::entity::{Approvable, Decision, Stateful};
use groundwork_core::reducer::Reducer;
use groundwork_core::workflow::{
    ApprovalAction, ApprovalReducer, WorkflowAction, WorkflowEnvironment, WorkflowReducer,
};
use groundwork_runtime::{Store, StoreConfig, StoreError};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

/// A named entity collection driven by a reducer
pub struct Registry<T, R>
where
    R: Reducer<State = KeyedCollection<T>, Environment = WorkflowEnvironment>,
{
    name: &'static str,
    store: Store<KeyedCollection<T>, R::Action, WorkflowEnvironment, R>,
}

impl<T, R> Registry<T, R>
where
    T: Stateful,
    R: Reducer<State = KeyedCollection<T>, Environment = WorkflowEnvironment>,
    R::Action: From<WorkflowAction<T>> + Debug,
{
    /// Creates a registry seeded with `items`
    #[must_use]
    pub fn new(
        name: &'static str,
        items: impl IntoIterator<Item = T>,
        reducer: R,
        environment: WorkflowEnvironment,
        config: StoreConfig,
    ) -> Self {
        Self {
            name,
            store: Store::with_config(items.into_iter().collect(), reducer, environment, config),
        }
    }

    /// Name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Send any action understood by the reducer
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DispatchDepthExceeded`] if the action sets off a
    /// runaway chain of dispatched actions.
    pub fn send(&mut self, action: impl Into<R::Action>) -> Result<(), StoreError> {
        self.store.send(action.into())
    }

    /// Append an entity
    ///
    /// Ids are not checked for uniqueness.
    ///
    /// # Errors
    ///
    /// See [`Registry::send`].
    pub fn add(&mut self, item: T) -> Result<(), StoreError> {
        debug!(collection = self.name, id = ?item.id(), "add");
        self.send(WorkflowAction::Add(item))
    }

    /// Shallow-merge `patch` onto the entity with the given id
    ///
    /// An absent id is a no-op.
    ///
    /// # Errors
    ///
    /// See [`Registry::send`].
    pub fn update(&mut self, id: &T::Id, patch: T::Patch) -> Result<(), StoreError> {
        self.log_absent(id, "update");
        self.send(WorkflowAction::Update {
            id: id.clone(),
            patch,
        })
    }

    /// Remove the entity with the given id; removing twice is harmless
    ///
    /// # Errors
    ///
    /// See [`Registry::send`].
    pub fn remove(&mut self, id: &T::Id) -> Result<(), StoreError> {
        self.log_absent(id, "remove");
        self.send(WorkflowAction::Remove { id: id.clone() })
    }

    /// Set the status of an entity to any value
    ///
    /// # Errors
    ///
    /// See [`Registry::send`].
    pub fn move_to_stage(&mut self, id: &T::Id, status: T::Status) -> Result<(), StoreError> {
        self.log_absent(id, "move_to_stage");
        debug!(collection = self.name, ?id, ?status, "move_to_stage");
        self.send(WorkflowAction::MoveToStage {
            id: id.clone(),
            status,
        })
    }

    /// Entity with the given id, if present
    #[must_use]
    pub fn get_by_id(&self, id: &T::Id) -> Option<Arc<T>> {
        self.store.state(|items| items.get_by_id(id))
    }

    /// Current contents
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T> {
        self.store.state(KeyedCollection::snapshot)
    }

    /// Number of entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.state(KeyedCollection::len)
    }

    /// Returns true if the registry holds no entities
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.state(KeyedCollection::is_empty)
    }

    /// Entities with the given status, in insertion order
    #[must_use]
    pub fn by_status(&self, status: &T::Status) -> Vec<Arc<T>> {
        self.snapshot().by_status(status)
    }

    fn log_absent(&self, id: &T::Id, operation: &'static str) {
        if !self.store.state(|items| items.contains(id)) {
            debug!(collection = self.name, ?id, operation, "id not present, nothing to change");
        }
    }
}

impl<T> Registry<T, ApprovalReducer<T>>
where
    T: Approvable,
{
    /// Approve an entity, recording the optional comment and decision time
    ///
    /// # Errors
    ///
    /// See [`Registry::send`].
    pub fn approve(&mut self, id: &T::Id, comment: Option<String>) -> Result<(), StoreError> {
        self.decide(id, Decision::Approve, comment)
    }

    /// Reject an entity, recording the optional comment and decision time
    ///
    /// # Errors
    ///
    /// See [`Registry::send`].
    pub fn reject(&mut self, id: &T::Id, comment: Option<String>) -> Result<(), StoreError> {
        self.decide(id, Decision::Reject, comment)
    }

    /// Entities waiting for a decision, in insertion order
    #[must_use]
    pub fn pending(&self) -> Vec<Arc<T>> {
        self.snapshot().pending()
    }

    fn decide(
        &mut self,
        id: &T::Id,
        decision: Decision,
        comment: Option<String>,
    ) -> Result<(), StoreError> {
        self.log_absent(id, "decide");
        debug!(collection = self.name, ?id, %decision, "decide");
        self.store.send(ApprovalAction::Decide {
            id: id.clone(),
            decision,
            comment,
        })
    }
}

impl Registry<WorkPackage, WorkPackageReducer> {
    /// Record progress for a work package
    ///
    /// This is the only path that clamps progress to 100 and drives the stage.
    /// Reaching 100 moves the package to `completed`. The first progress on a
    /// package that has not started moves it to `in_progress`.
    ///
    /// Patching `progress` through [`Registry::update`] stores the raw value
    /// and leaves the status alone.
    ///
    /// # Errors
    ///
    /// See [`Registry::send`].
    pub fn report_progress(&mut self, id: &WorkPackageId, percent: u8) -> Result<(), StoreError> {
        self.log_absent(id, "report_progress");
        self.store.send(WorkPackageAction::ReportProgress {
            id: id.clone(),
            percent,
        })
    }
}

impl<T, R> Debug for Registry<T, R>
where
    R: Reducer<State = KeyedCollection<T>, Environment = WorkflowEnvironment>,
    R::Action: Debug,
    T: Stateful,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.name)
            .field("len", &self.store.state(KeyedCollection::len))
            .finish_non_exhaustive()
    }
}

/// Project registry
pub type Projects = Registry<Project, WorkflowReducer<Project>>;
/// Tender registry
pub type Tenders = Registry<Tender, WorkflowReducer<Tender>>;
/// Contract registry
pub type Contracts = Registry<Contract, WorkflowReducer<Contract>>;
/// Employee registry
pub type Employees = Registry<Employee, WorkflowReducer<Employee>>;
/// Payment request registry with approve / reject
pub type PaymentRequests = Registry<PaymentRequest, ApprovalReducer<PaymentRequest>>;
/// Design request registry with approve / reject
pub type DesignRequests = Registry<DesignRequest, ApprovalReducer<DesignRequest>>;
/// Approval inbox
pub type Approvals = Registry<Approval, ApprovalReducer<Approval>>;
/// Work package registry with progress reporting
pub type WorkPackages = Registry<WorkPackage, WorkPackageReducer>;
