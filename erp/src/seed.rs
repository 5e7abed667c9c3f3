//! Static seed data.
//!
//! The bundled mock data is compiled into the binary. A JSON file with the
//! same shape can replace it at start-up; collections missing from the file
//! start empty.

use crate::entities::{
    Approval, Contract, DesignRequest, Employee, PaymentRequest, Project, Tender, WorkPackage,
};
use crate::error::SeedError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUNDLED: &str = include_str!("../seed/mock.json");

/// Initial contents of every collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Seed {
    /// Projects
    pub projects: Vec<Project>,
    /// Tenders
    pub tenders: Vec<Tender>,
    /// Contracts
    pub contracts: Vec<Contract>,
    /// Payment requests
    pub payment_requests: Vec<PaymentRequest>,
    /// Employees
    pub employees: Vec<Employee>,
    /// Design requests
    pub design_requests: Vec<DesignRequest>,
    /// Work packages
    pub work_packages: Vec<WorkPackage>,
    /// Approval inbox
    pub approvals: Vec<Approval>,
}

impl Seed {
    /// The mock data shipped with the crate
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Parse`] if the bundled document is malformed.
    pub fn bundled() -> Result<Self, SeedError> {
        Self::from_json(BUNDLED)
    }

    /// Parse a seed document
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Parse`] if `json` is not a valid seed document.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a seed file
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Io`] if the file cannot be read and
    /// [`SeedError::Parse`] if it is not a valid seed document.
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Read `path` if given, otherwise use the bundled data
    ///
    /// # Errors
    ///
    /// See [`Seed::from_path`] and [`Seed::bundled`].
    pub fn load(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading seed file");
                Self::from_path(path)
            },
            None => Self::bundled(),
        }
    }

    /// Total number of entities across all collections
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
            + self.tenders.len()
            + self.contracts.len()
            + self.payment_requests.len()
            + self.employees.len()
            + self.design_requests.len()
            + self.work_packages.len()
            + self.approvals.len()
    }

    /// Returns true if every collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
