//! The coordinating context that owns every registry.

use crate::config::ErpConfig;
use crate::dashboard::{Dashboard, ProjectSummary};
use crate::entities::WorkPackageReducer;
use crate::error::ErpError;
use crate::ids::ProjectId;
use crate::registry::{
    Approvals, Contracts, DesignRequests, Employees, PaymentRequests, Projects, Registry, Tenders,
    WorkPackages,
};
use crate::seed::Seed;
use groundwork_core::environment::Clock;
use groundwork_core::workflow::{ApprovalReducer, WorkflowEnvironment, WorkflowReducer};
use groundwork_runtime::StoreConfig;
use std::sync::Arc;

/// One registry per entity type, seeded together
///
/// Registries are public fields; callers borrow the one they need.
///
/// # Example
///
/// ```ignore
/// let mut workspace = Workspace::from_config(&ErpConfig::from_env()?, Arc::new(SystemClock))?;
///
/// workspace.payment_requests.approve(&PaymentRequestId::from("PAY-003"), None)?;
/// println!("{}", workspace.dashboard().render("USD"));
/// ```
#[derive(Debug)]
pub struct Workspace {
    /// Projects
    pub projects: Projects,
    /// Tenders
    pub tenders: Tenders,
    /// Contracts
    pub contracts: Contracts,
    /// Payment requests
    pub payment_requests: PaymentRequests,
    /// Employees
    pub employees: Employees,
    /// Design requests
    pub design_requests: DesignRequests,
    /// Work packages
    pub work_packages: WorkPackages,
    /// Approval inbox
    pub approvals: Approvals,
}

impl Workspace {
    /// Build a workspace from seed data
    #[must_use]
    pub fn from_seed(seed: Seed, environment: WorkflowEnvironment, config: StoreConfig) -> Self {
        let workspace = Self {
            projects: Registry::new(
                "projects",
                seed.projects,
                WorkflowReducer::new(),
                environment.clone(),
                config,
            ),
            tenders: Registry::new(
                "tenders",
                seed.tenders,
                WorkflowReducer::new(),
                environment.clone(),
                config,
            ),
            contracts: Registry::new(
                "contracts",
                seed.contracts,
                WorkflowReducer::new(),
                environment.clone(),
                config,
            ),
            payment_requests: Registry::new(
                "payment_requests",
                seed.payment_requests,
                ApprovalReducer::new(),
                environment.clone(),
                config,
            ),
            employees: Registry::new(
                "employees",
                seed.employees,
                WorkflowReducer::new(),
                environment.clone(),
                config,
            ),
            design_requests: Registry::new(
                "design_requests",
                seed.design_requests,
                ApprovalReducer::new(),
                environment.clone(),
                config,
            ),
            work_packages: Registry::new(
                "work_packages",
                seed.work_packages,
                WorkPackageReducer::new(),
                environment.clone(),
                config,
            ),
            approvals: Registry::new(
                "approvals",
                seed.approvals,
                ApprovalReducer::new(),
                environment,
                config,
            ),
        };

        tracing::info!(
            projects = workspace.projects.len(),
            tenders = workspace.tenders.len(),
            contracts = workspace.contracts.len(),
            payment_requests = workspace.payment_requests.len(),
            employees = workspace.employees.len(),
            design_requests = workspace.design_requests.len(),
            work_packages = workspace.work_packages.len(),
            approvals = workspace.approvals.len(),
            "Workspace seeded"
        );

        workspace
    }

    /// Load seed data named by `config` and build a workspace
    ///
    /// # Errors
    ///
    /// Returns [`ErpError::Seed`] if the seed data cannot be loaded.
    pub fn from_config(config: &ErpConfig, clock: Arc<dyn Clock>) -> Result<Self, ErpError> {
        let seed = Seed::load(config.seed_path.as_deref())?;
        Ok(Self::from_seed(
            seed,
            WorkflowEnvironment::new(clock),
            config.store_config(),
        ))
    }

    /// Portfolio dashboard over the current snapshots
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::compute(self)
    }

    /// Summary for one project, or `None` if it does not exist
    #[must_use]
    pub fn project_summary(&self, id: &ProjectId) -> Option<ProjectSummary> {
        self.projects
            .get_by_id(id)
            .map(|project| ProjectSummary::compute(self, &project))
    }
}
