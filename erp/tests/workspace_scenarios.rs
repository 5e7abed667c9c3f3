//! End-to-end workflow scenarios over the bundled seed data.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use groundwork_core::entity::Stateful;
use groundwork_core::environment::Clock;
use groundwork_erp::entities::{
    ApprovalStatus, DesignStatus, Discipline, PaymentStatus, Priority, Project, ProjectPatch,
    ProjectStatus, TenderStatus, WorkPackagePatch, WorkPackageStatus,
};
use groundwork_erp::ids::{
    ApprovalId, DesignRequestId, PaymentRequestId, ProjectId, TenderId, WorkPackageId,
};
use groundwork_erp::{Money, Seed, Workspace};
use groundwork_runtime::StoreConfig;
use groundwork_testing::helpers::init_test_tracing;
use groundwork_testing::{test_clock, test_environment};

fn workspace() -> Workspace {
    init_test_tracing();
    Workspace::from_seed(
        Seed::bundled().unwrap(),
        test_environment(),
        StoreConfig::default(),
    )
}

#[test]
fn approving_a_payment_removes_it_from_pending() {
    let mut workspace = workspace();
    let id = PaymentRequestId::from("PAY-003");
    let before = workspace.payment_requests.snapshot();

    workspace
        .payment_requests
        .approve(&id, Some("Certified".to_string()))
        .unwrap();

    let request = workspace.payment_requests.get_by_id(&id).unwrap();
    assert_eq!(request.status, PaymentStatus::Approved);
    assert_eq!(request.comment.as_deref(), Some("Certified"));
    assert_eq!(request.decided_at, Some(test_clock().now()));

    let pending: Vec<_> = workspace
        .payment_requests
        .pending()
        .iter()
        .map(|request| request.id.clone())
        .collect();
    assert_eq!(pending, vec![PaymentRequestId::from("PAY-004")]);

    // The snapshot taken before the decision still shows the old status
    assert_eq!(before.get(&id).unwrap().status, PaymentStatus::Submitted);
}

#[test]
fn decided_items_can_move_to_any_stage() {
    let mut workspace = workspace();
    let id = PaymentRequestId::from("PAY-003");

    workspace.payment_requests.approve(&id, None).unwrap();
    workspace
        .payment_requests
        .move_to_stage(&id, PaymentStatus::Draft)
        .unwrap();

    assert_eq!(
        *workspace.payment_requests.get_by_id(&id).unwrap().status(),
        PaymentStatus::Draft
    );
    assert_eq!(workspace.payment_requests.pending().len(), 1);
}

#[test]
fn rejecting_design_request_keeps_other_fields() {
    let mut workspace = workspace();
    let id = DesignRequestId::from("DRQ-002");

    workspace
        .design_requests
        .reject(&id, Some("Resubmit with coordinated sections".to_string()))
        .unwrap();

    let request = workspace.design_requests.get_by_id(&id).unwrap();
    assert_eq!(request.status, DesignStatus::Rejected);
    assert_eq!(request.discipline, Discipline::Mep);
    assert_eq!(request.priority, Priority::Medium);
    assert_eq!(request.title, "Riser relocation on level 4");
    assert_eq!(workspace.design_requests.pending().len(), 1);
}

#[test]
fn approval_inbox_decisions() {
    let mut workspace = workspace();

    workspace
        .approvals
        .approve(&ApprovalId::from("APR-001"), None)
        .unwrap();
    workspace
        .approvals
        .reject(&ApprovalId::from("APR-002"), Some("Include in VO-013".to_string()))
        .unwrap();

    assert_eq!(workspace.approvals.pending().len(), 1);
    assert_eq!(
        workspace.approvals.by_status(&ApprovalStatus::Rejected).len(),
        2
    );
}

#[test]
fn tender_stage_moves_are_unguarded() {
    let mut workspace = workspace();
    let id = TenderId::from("TND-004");

    workspace
        .tenders
        .move_to_stage(&id, TenderStatus::Awarded)
        .unwrap();
    workspace
        .tenders
        .move_to_stage(&id, TenderStatus::Draft)
        .unwrap();

    assert_eq!(
        workspace.tenders.get_by_id(&id).unwrap().status,
        TenderStatus::Draft
    );
}

#[test]
fn full_progress_completes_work_package_through_the_store() {
    let mut workspace = workspace();
    let id = WorkPackageId::from("WP-004");

    workspace.work_packages.report_progress(&id, 100).unwrap();

    let package = workspace.work_packages.get_by_id(&id).unwrap();
    assert_eq!(package.progress, 100);
    assert_eq!(package.status, WorkPackageStatus::Completed);

    let summary = workspace
        .project_summary(&ProjectId::from("PRJ-001"))
        .unwrap();
    assert_eq!(summary.open_work_packages, 2);
    assert_eq!(workspace.dashboard().average_work_package_progress, 67);
}

#[test]
fn first_progress_starts_work_package() {
    let mut workspace = workspace();
    let id = WorkPackageId::from("WP-005");

    workspace.work_packages.report_progress(&id, 5).unwrap();

    let package = workspace.work_packages.get_by_id(&id).unwrap();
    assert_eq!(package.progress, 5);
    assert_eq!(package.status, WorkPackageStatus::InProgress);
}

#[test]
fn only_reported_progress_is_clamped() {
    let mut workspace = workspace();
    let patched = WorkPackageId::from("WP-003");
    let reported = WorkPackageId::from("WP-005");

    workspace
        .work_packages
        .update(&patched, WorkPackagePatch::default().progress(250_u8))
        .unwrap();
    workspace.work_packages.report_progress(&reported, 250).unwrap();

    let package = workspace.work_packages.get_by_id(&patched).unwrap();
    assert_eq!(package.progress, 250);
    assert_eq!(package.status, WorkPackageStatus::InProgress);

    let package = workspace.work_packages.get_by_id(&reported).unwrap();
    assert_eq!(package.progress, 100);
    assert_eq!(package.status, WorkPackageStatus::Completed);
}

#[test]
fn project_crud_and_dashboard() {
    let mut workspace = workspace();
    let id = ProjectId::from("PRJ-005");
    let template = workspace
        .projects
        .get_by_id(&ProjectId::from("PRJ-003"))
        .unwrap();

    workspace
        .projects
        .add(Project {
            id: id.clone(),
            code: "LAB-25".to_string(),
            name: "Science Park Lab Fit-out".to_string(),
            budget: Money::from_major(2_000_000),
            spent: Money::ZERO,
            progress: 0,
            status: ProjectStatus::Planning,
            ..Project::clone(&template)
        })
        .unwrap();
    workspace
        .projects
        .update(&id, ProjectPatch::default().status(ProjectStatus::Active))
        .unwrap();

    let dashboard = workspace.dashboard();
    assert_eq!(dashboard.active_projects, 3);
    assert_eq!(dashboard.total_budget, Money::from_minor(4_045_000_000));

    workspace.projects.remove(&id).unwrap();
    workspace.projects.remove(&id).unwrap();
    assert_eq!(workspace.projects.len(), 4);
    assert_eq!(workspace.dashboard().active_projects, 2);
}

#[test]
fn stage_feedback_fits_a_dispatch_depth_of_one() {
    init_test_tracing();
    let mut workspace = Workspace::from_seed(
        Seed::bundled().unwrap(),
        test_environment(),
        StoreConfig::new(1),
    );

    // One dispatched stage move fits within a depth of one
    workspace
        .work_packages
        .report_progress(&WorkPackageId::from("WP-003"), 100)
        .unwrap();

    assert_eq!(
        workspace
            .work_packages
            .get_by_id(&WorkPackageId::from("WP-003"))
            .unwrap()
            .status,
        WorkPackageStatus::Completed
    );
}

mod progress_properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn progress_is_clamped_and_completion_follows(percent in any::<u8>()) {
            let mut workspace = workspace();
            let id = WorkPackageId::from("WP-003");

            workspace.work_packages.report_progress(&id, percent).unwrap();

            let package = workspace.work_packages.get_by_id(&id).unwrap();
            prop_assert_eq!(package.progress, percent.min(100));
            prop_assert_eq!(
                package.status == WorkPackageStatus::Completed,
                percent >= 100
            );
        }

        #[test]
        fn money_sum_matches_minor_units(values in proptest::collection::vec(-1_000_000_i64..1_000_000, 0..20)) {
            let total: Money = values.iter().copied().map(Money::from_minor).sum();
            prop_assert_eq!(total.minor(), values.iter().sum::<i64>());
        }
    }
}
