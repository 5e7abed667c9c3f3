//! Employees moving through HR onboarding.

use crate::ids::EmployeeId;
use chrono::NaiveDate;
use groundwork_macros::Entity;
use serde::{Deserialize, Serialize};

label_enum! {
    /// Employment stage
    EmployeeStatus {
        /// Offer sent
        Offered => "offered",
        /// Completing onboarding
        Onboarding => "onboarding",
        /// Working
        Active => "active",
        /// Temporarily away
        OnLeave => "on_leave",
        /// Left the company
        Terminated => "terminated",
    }
}

/// An employee or new hire
#[derive(Entity, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee id
    #[id]
    pub id: EmployeeId,
    /// Full name
    pub name: String,
    /// Job title
    pub position: String,
    /// Department
    pub department: String,
    /// Work email
    pub email: String,
    /// Work phone
    pub phone: String,
    /// First working day
    pub start_date: NaiveDate,
    /// Completed onboarding checklist items, in percent
    pub onboarding_progress: u8,
    /// Employment stage
    #[status]
    pub status: EmployeeStatus,
}

impl Employee {
    /// Returns true while onboarding is in progress
    #[must_use]
    pub fn is_onboarding(&self) -> bool {
        self.status == EmployeeStatus::Onboarding
    }
}
