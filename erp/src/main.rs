//! Groundwork demo
//!
//! Seeds a workspace, prints the portfolio dashboard, walks through a few
//! typical workflow steps and prints the dashboard again.
//!
//! ```bash
//! cargo run --bin groundwork-demo
//! GROUNDWORK_CURRENCY=EUR RUST_LOG=groundwork=debug cargo run --bin groundwork-demo
//! ```

use anyhow::Context;
use groundwork_core::environment::SystemClock;
use groundwork_erp::entities::{TenderStatus, WorkPackagePatch};
use groundwork_erp::ids::{
    ApprovalId, DesignRequestId, PaymentRequestId, ProjectId, TenderId, WorkPackageId,
};
use groundwork_erp::{ErpConfig, ErpError, Workspace};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    run().context("Groundwork demo failed")
}

fn run() -> Result<(), ErpError> {
    let config = ErpConfig::from_env()?;
    init_tracing(&config.log_filter);

    let mut workspace = Workspace::from_config(&config, Arc::new(SystemClock))?;

    println!("=== Portfolio ===");
    print!("{}", workspace.dashboard().render(&config.currency));

    run_scenario(&mut workspace)?;

    println!();
    println!("=== Portfolio after review ===");
    print!("{}", workspace.dashboard().render(&config.currency));

    println!();
    if let Some(summary) = workspace.project_summary(&ProjectId::from("PRJ-001")) {
        print!("{}", summary.render(&config.currency));
    }

    Ok(())
}

fn run_scenario(workspace: &mut Workspace) -> Result<(), ErpError> {
    let payment = PaymentRequestId::from("PAY-003");
    workspace
        .payment_requests
        .approve(&payment, Some("Quantities checked against the steel schedule".to_string()))?;
    workspace.approvals.approve(&ApprovalId::from("APR-001"), None)?;
    info!(%payment, "Payment certified");

    let design = DesignRequestId::from("DRQ-002");
    workspace
        .design_requests
        .reject(&design, Some("Riser clashes with the transfer beam, resubmit".to_string()))?;
    info!(%design, "Design request returned");

    let tender = TenderId::from("TND-002");
    workspace.tenders.move_to_stage(&tender, TenderStatus::Bidding)?;

    let package = WorkPackageId::from("WP-004");
    workspace
        .work_packages
        .update(&package, WorkPackagePatch::default().assignee("Forge Steel Ltd, deck crew"))?;
    workspace.work_packages.report_progress(&package, 100)?;

    if let Some(package) = workspace.work_packages.get_by_id(&package) {
        info!(id = %package.id, status = %package.status, "Work package reported complete");
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
