//! Derived portfolio views.
//!
//! Both views are computed from the current snapshots on every call.

use crate::entities::{ContractStatus, Project, ProjectStatus, WorkPackage};
use crate::ids::ProjectId;
use crate::money::Money;
use crate::workspace::Workspace;
use serde::Serialize;
use std::fmt::Write as _;

/// Portfolio-wide figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Projects currently on site
    pub active_projects: usize,
    /// Sum of all project budgets
    pub total_budget: Money,
    /// Sum of all project spend
    pub total_spent: Money,
    /// Tenders accepting bids
    pub open_tenders: usize,
    /// Value of active contracts
    pub active_contract_value: Money,
    /// Payment requests waiting for a decision
    pub pending_payments: usize,
    /// Gross amount of those payment requests
    pub pending_payment_amount: Money,
    /// Design requests waiting for a decision
    pub pending_design_reviews: usize,
    /// Approval inbox items waiting for a decision
    pub pending_approvals: usize,
    /// Employees in onboarding
    pub employees_onboarding: usize,
    /// Mean work package progress, rounded down
    pub average_work_package_progress: u8,
}

impl Dashboard {
    /// Compute the dashboard for `workspace`
    #[must_use]
    pub fn compute(workspace: &Workspace) -> Self {
        let projects = workspace.projects.snapshot();
        let pending_payments = workspace.payment_requests.pending();
        let work_packages = workspace.work_packages.snapshot();

        Self {
            active_projects: workspace.projects.by_status(&ProjectStatus::Active).len(),
            total_budget: projects.iter().map(|project| project.budget).sum(),
            total_spent: projects.iter().map(|project| project.spent).sum(),
            open_tenders: workspace.tenders.snapshot().filter(|tender| tender.is_open()).len(),
            active_contract_value: workspace
                .contracts
                .snapshot()
                .filter(|contract| contract.is_active())
                .iter()
                .map(|contract| contract.value)
                .sum(),
            pending_payments: pending_payments.len(),
            pending_payment_amount: pending_payments.iter().map(|request| request.amount).sum(),
            pending_design_reviews: workspace.design_requests.pending().len(),
            pending_approvals: workspace.approvals.pending().len(),
            employees_onboarding: workspace
                .employees
                .snapshot()
                .filter(|employee| employee.is_onboarding())
                .len(),
            average_work_package_progress: average_progress(
                work_packages.iter().map(|package| package.as_ref()),
            ),
        }
    }

    /// Plain-text rendering with amounts in `currency`
    #[must_use]
    pub fn render(&self, currency: &str) -> String {
        let mut out = String::new();
        let rows = [
            ("Active projects", self.active_projects.to_string()),
            ("Total budget", self.total_budget.format(currency)),
            ("Total spent", self.total_spent.format(currency)),
            ("Open tenders", self.open_tenders.to_string()),
            ("Active contract value", self.active_contract_value.format(currency)),
            (
                "Pending payments",
                format!(
                    "{} ({})",
                    self.pending_payments,
                    self.pending_payment_amount.format(currency)
                ),
            ),
            ("Pending design reviews", self.pending_design_reviews.to_string()),
            ("Pending approvals", self.pending_approvals.to_string()),
            ("Employees onboarding", self.employees_onboarding.to_string()),
            (
                "Work package progress",
                format!("{}%", self.average_work_package_progress),
            ),
        ];

        for (label, value) in rows {
            let _ = writeln!(out, "{label:<24}{value}");
        }
        out
    }
}

/// Figures for a single project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// Project id
    pub project_id: ProjectId,
    /// Project name
    pub name: String,
    /// Current stage
    pub status: ProjectStatus,
    /// Approved budget
    pub budget: Money,
    /// Spend to date
    pub spent: Money,
    /// Budget minus spend
    pub remaining: Money,
    /// Value of contracts that have not been terminated
    pub contract_value: Money,
    /// Gross amount of paid and reconciled payment requests
    pub paid_to_date: Money,
    /// Work packages not yet completed
    pub open_work_packages: usize,
    /// Mean work package progress, rounded down
    pub progress: u8,
}

impl ProjectSummary {
    /// Compute the summary for `project`
    #[must_use]
    pub fn compute(workspace: &Workspace, project: &Project) -> Self {
        let id = &project.id;
        let packages = workspace
            .work_packages
            .snapshot()
            .filter(|package| &package.project_id == id);

        Self {
            project_id: id.clone(),
            name: project.name.clone(),
            status: project.status,
            budget: project.budget,
            spent: project.spent,
            remaining: project.remaining_budget(),
            contract_value: workspace
                .contracts
                .snapshot()
                .filter(|contract| {
                    &contract.project_id == id && contract.status != ContractStatus::Terminated
                })
                .iter()
                .map(|contract| contract.value)
                .sum(),
            paid_to_date: workspace
                .payment_requests
                .snapshot()
                .filter(|request| &request.project_id == id && request.is_settled())
                .iter()
                .map(|request| request.amount)
                .sum(),
            open_work_packages: packages.iter().filter(|package| package.is_open()).count(),
            progress: average_progress(packages.iter().map(|package| package.as_ref())),
        }
    }

    /// Plain-text rendering with amounts in `currency`
    #[must_use]
    pub fn render(&self, currency: &str) -> String {
        format!(
            "{} ({}, {})\n  budget {} / spent {} / remaining {}\n  contracted {} / paid {}\n  {} open work packages, {}% complete\n",
            self.name,
            self.project_id,
            self.status,
            self.budget.format(currency),
            self.spent.format(currency),
            self.remaining.format(currency),
            self.contract_value.format(currency),
            self.paid_to_date.format(currency),
            self.open_work_packages,
            self.progress,
        )
    }
}

fn average_progress<'a>(packages: impl Iterator<Item = &'a WorkPackage>) -> u8 {
    let (total, count) = packages.fold((0_u32, 0_u32), |(total, count), package| {
        (total + u32::from(package.progress), count + 1)
    });

    match count {
        0 => 0,
        _ => u8::try_from(total / count).unwrap_or(u8::MAX),
    }
}
