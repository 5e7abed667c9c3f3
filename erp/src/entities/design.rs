//! Design requests sent to the design team for review.

use crate::ids::{DesignRequestId, ProjectId};
use chrono::{DateTime, NaiveDate, Utc};
use groundwork_core::entity::Approvable;
use groundwork_macros::Entity;
use serde::{Deserialize, Serialize};

label_enum! {
    /// Review stage of a design request
    DesignStatus {
        /// Being written
        Draft => "draft",
        /// Sent to the design team
        Submitted => "submitted",
        /// Being reviewed
        UnderReview => "under_review",
        /// Accepted
        Approved => "approved",
        /// Sent back for changes
        RevisionRequired => "revision_required",
        /// Declined
        Rejected => "rejected",
    }
}

label_enum! {
    /// Design discipline
    Discipline {
        /// Architecture
        Architectural => "architectural",
        /// Structural engineering
        Structural => "structural",
        /// Mechanical, electrical and plumbing
        Mep => "mep",
        /// Civil engineering
        Civil => "civil",
        /// Landscape
        Landscape => "landscape",
    }
}

label_enum! {
    /// Review priority
    Priority {
        /// Low
        Low => "low",
        /// Medium
        Medium => "medium",
        /// High
        High => "high",
        /// Blocking work on site
        Urgent => "urgent",
    }
}

/// A request for a design change or clarification
#[derive(Entity, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRequest {
    /// Design request id
    #[id]
    pub id: DesignRequestId,
    /// Owning project
    pub project_id: ProjectId,
    /// Reference, e.g. `RFI-031`
    pub reference: String,
    /// Subject
    pub title: String,
    /// Discipline responsible for the answer
    pub discipline: Discipline,
    /// Review priority
    pub priority: Priority,
    /// Person who raised the request
    pub requested_by: String,
    /// Answer needed by
    pub due_date: NaiveDate,
    /// Review stage
    #[status]
    pub status: DesignStatus,
    /// Reviewer comment from the last decision
    pub comment: Option<String>,
    /// Time of the last decision
    pub decided_at: Option<DateTime<Utc>>,
}

impl DesignRequest {
    /// Returns true if the request is still awaiting an answer after its due date
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && today > self.due_date
    }
}

impl Approvable for DesignRequest {
    fn approved_status() -> DesignStatus {
        DesignStatus::Approved
    }

    fn rejected_status() -> DesignStatus {
        DesignStatus::Rejected
    }

    fn is_pending(&self) -> bool {
        matches!(self.status, DesignStatus::Submitted | DesignStatus::UnderReview)
    }

    fn record_decision(&mut self, comment: Option<String>, decided_at: DateTime<Utc>) {
        self.comment = comment;
        self.decided_at = Some(decided_at);
    }
}
