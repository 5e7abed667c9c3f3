//! Construction projects.

use crate::ids::ProjectId;
use crate::money::Money;
use chrono::NaiveDate;
use groundwork_macros::Entity;
use serde::{Deserialize, Serialize};

label_enum! {
    /// Lifecycle stage of a project
    ProjectStatus {
        /// Scoping, budgeting and permits
        Planning => "planning",
        /// On site
        Active => "active",
        /// Work suspended
        OnHold => "on_hold",
        /// Handed over
        Completed => "completed",
        /// Abandoned before completion
        Cancelled => "cancelled",
    }
}

/// A construction project
#[derive(Entity, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id
    #[id]
    pub id: ProjectId,
    /// Short internal code, e.g. `HQ-24`
    pub code: String,
    /// Display name
    pub name: String,
    /// Client organisation
    pub client: String,
    /// Site location
    pub location: String,
    /// Responsible project manager
    pub manager: String,
    /// Approved budget
    pub budget: Money,
    /// Cost booked so far
    pub spent: Money,
    /// Planned start
    pub start_date: NaiveDate,
    /// Planned completion
    pub end_date: NaiveDate,
    /// Overall progress in percent
    pub progress: u8,
    /// Lifecycle stage
    #[status]
    pub status: ProjectStatus,
}

impl Project {
    /// Budget not yet spent; negative when over budget, saturating at the `i64` bounds
    #[must_use]
    pub fn remaining_budget(&self) -> Money {
        self.budget - self.spent
    }

    /// Returns true if spending exceeds the budget
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }

    /// Returns true if the project is on site
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }
}
