//! Work packages and progress reporting.
//!
//! Progress reports feed back into the package's stage: reaching 100% moves
//! it to `completed`, and the first report above 0% moves a package that has
//! not started to `in_progress`. Both moves go through the store as
//! dispatched [`WorkflowAction::MoveToStage`] actions.

use crate::ids::{ProjectId, WorkPackageId};
use chrono::NaiveDate;
use groundwork_core::collection::KeyedCollection;
use groundwork_core::effect::Effect;
use groundwork_core::reducer::Reducer;
use groundwork_core::workflow::{WorkflowAction, WorkflowEnvironment, WorkflowReducer};
use groundwork_core::{SmallVec, smallvec};
use groundwork_macros::Entity;
use serde::{Deserialize, Serialize};

label_enum! {
    /// Execution stage of a work package
    WorkPackageStatus {
        /// Not yet started
        NotStarted => "not_started",
        /// Being worked on
        InProgress => "in_progress",
        /// Waiting for inspection
        Inspection => "inspection",
        /// Done
        Completed => "completed",
        /// Paused
        OnHold => "on_hold",
    }
}

/// A unit of work on site
#[derive(Entity, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackage {
    /// Work package id
    #[id]
    pub id: WorkPackageId,
    /// Owning project
    pub project_id: ProjectId,
    /// WBS code
    pub code: String,
    /// Description
    pub name: String,
    /// Crew or subcontractor doing the work
    pub assignee: String,
    /// Planned start
    pub planned_start: NaiveDate,
    /// Planned finish
    pub planned_finish: NaiveDate,
    /// Progress in percent
    ///
    /// `report_progress` clamps to 100; a plain patch stores the value as given.
    pub progress: u8,
    /// Execution stage
    #[status]
    pub status: WorkPackageStatus,
}

impl WorkPackage {
    /// Returns true until the package is completed
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status != WorkPackageStatus::Completed
    }
}

/// Actions for the work package collection
#[derive(Clone, Debug, PartialEq)]
pub enum WorkPackageAction {
    /// Plain workflow action
    Workflow(WorkflowAction<WorkPackage>),

    /// Record progress; values above 100 are clamped
    ReportProgress {
        /// Package reporting
        id: WorkPackageId,
        /// New progress in percent
        percent: u8,
    },
}

impl From<WorkflowAction<WorkPackage>> for WorkPackageAction {
    fn from(action: WorkflowAction<WorkPackage>) -> Self {
        Self::Workflow(action)
    }
}

/// Reducer for [`WorkPackageAction`]
#[derive(Clone, Debug, Default)]
pub struct WorkPackageReducer {
    workflow: WorkflowReducer<WorkPackage>,
}

impl WorkPackageReducer {
    /// Creates a new `WorkPackageReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            workflow: WorkflowReducer::new(),
        }
    }
}

/// Stage implied by a progress report, if it differs from the current one
fn stage_for_progress(current: WorkPackageStatus, percent: u8) -> Option<WorkPackageStatus> {
    match (current, percent) {
        (WorkPackageStatus::Completed, 100) => None,
        (_, 100) => Some(WorkPackageStatus::Completed),
        (WorkPackageStatus::NotStarted, 1..=99) => Some(WorkPackageStatus::InProgress),
        _ => None,
    }
}

impl Reducer for WorkPackageReducer {
    type State = KeyedCollection<WorkPackage>;
    type Action = WorkPackageAction;
    type Environment = WorkflowEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            WorkPackageAction::Workflow(action) => self
                .workflow
                .reduce(state, action, env)
                .into_iter()
                .map(|effect| effect.map(WorkPackageAction::Workflow))
                .collect(),
            WorkPackageAction::ReportProgress { id, percent } => {
                let percent = percent.min(100);
                if !state.update_with(&id, |package| package.progress = percent) {
                    return SmallVec::new();
                }

                let next = state
                    .get_by_id(&id)
                    .and_then(|package| stage_for_progress(package.status, percent));

                match next {
                    Some(status) => smallvec![Effect::dispatch(WorkPackageAction::Workflow(
                        WorkflowAction::MoveToStage { id, status },
                    ))],
                    None => SmallVec::new(),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groundwork_testing::{ReducerTest, assertions, test_environment};

    fn package(id: &str, progress: u8, status: WorkPackageStatus) -> WorkPackage {
        WorkPackage {
            id: WorkPackageId::from(id),
            project_id: ProjectId::from("PRJ-001"),
            code: "1.2.3".to_string(),
            name: "Level 2 slab".to_string(),
            assignee: "Concrete crew A".to_string(),
            planned_start: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            planned_finish: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            progress,
            status,
        }
    }

    fn move_to(id: &str, status: WorkPackageStatus) -> WorkPackageAction {
        WorkPackageAction::Workflow(WorkflowAction::MoveToStage {
            id: WorkPackageId::from(id),
            status,
        })
    }

    fn given(packages: Vec<WorkPackage>) -> KeyedCollection<WorkPackage> {
        packages.into_iter().collect()
    }

    #[test]
    fn partial_progress_starts_package() {
        ReducerTest::new(WorkPackageReducer::new())
            .with_env(test_environment())
            .given_state(given(vec![package("WP-1", 0, WorkPackageStatus::NotStarted)]))
            .when_action(WorkPackageAction::ReportProgress {
                id: WorkPackageId::from("WP-1"),
                percent: 35,
            })
            .then_state(|state| {
                let package = state.get_by_id(&WorkPackageId::from("WP-1")).unwrap();
                assert_eq!(package.progress, 35);
                assert_eq!(package.status, WorkPackageStatus::NotStarted);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_dispatches(effects, &[move_to("WP-1", WorkPackageStatus::InProgress)]);
            })
            .run();
    }

    #[test]
    fn progress_is_clamped_and_completes() {
        ReducerTest::new(WorkPackageReducer::new())
            .with_env(test_environment())
            .given_state(given(vec![package("WP-1", 80, WorkPackageStatus::Inspection)]))
            .when_action(WorkPackageAction::ReportProgress {
                id: WorkPackageId::from("WP-1"),
                percent: 140,
            })
            .then_state(|state| {
                assert_eq!(state.get_by_id(&WorkPackageId::from("WP-1")).unwrap().progress, 100);
            })
            .then_effects(|effects| {
                assertions::assert_dispatches(effects, &[move_to("WP-1", WorkPackageStatus::Completed)]);
            })
            .run();
    }

    #[test]
    fn progress_on_absent_package_does_nothing() {
        ReducerTest::new(WorkPackageReducer::new())
            .with_env(test_environment())
            .given_state(given(vec![package("WP-1", 10, WorkPackageStatus::InProgress)]))
            .when_action(WorkPackageAction::ReportProgress {
                id: WorkPackageId::from("WP-404"),
                percent: 100,
            })
            .then_state(|state| {
                assert_eq!(state.get_by_id(&WorkPackageId::from("WP-1")).unwrap().progress, 10);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn stage_rules() {
        use WorkPackageStatus::{Completed, InProgress, Inspection, NotStarted, OnHold};

        assert_eq!(stage_for_progress(NotStarted, 0), None);
        assert_eq!(stage_for_progress(NotStarted, 50), Some(InProgress));
        assert_eq!(stage_for_progress(OnHold, 50), None);
        assert_eq!(stage_for_progress(Inspection, 100), Some(Completed));
        assert_eq!(stage_for_progress(Completed, 100), None);
    }
}
