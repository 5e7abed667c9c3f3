//! Approval inbox items.
//!
//! An inbox item points at a document elsewhere by `reference`. Deciding an
//! item does not touch the referenced document.

use crate::ids::ApprovalId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use groundwork_core::entity::Approvable;
use groundwork_macros::Entity;
use serde::{Deserialize, Serialize};

label_enum! {
    /// Kind of document awaiting approval
    ApprovalKind {
        /// Payment certificate
        Payment => "payment",
        /// Contract award
        Contract => "contract",
        /// Design change
        Design => "design",
        /// Variation order
        Variation => "variation",
        /// Timesheet
        Timesheet => "timesheet",
        /// Purchase order
        Purchase => "purchase",
    }
}

label_enum! {
    /// Decision state of an inbox item
    ApprovalStatus {
        /// Awaiting a decision
        Pending => "pending",
        /// Approved
        Approved => "approved",
        /// Rejected
        Rejected => "rejected",
    }
}

/// An item in someone's approval inbox
#[derive(Entity, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    /// Approval id
    #[id]
    pub id: ApprovalId,
    /// Kind of document
    pub kind: ApprovalKind,
    /// Reference of the document
    pub reference: String,
    /// Summary line
    pub title: String,
    /// Requester
    pub requested_by: String,
    /// Amount at stake, if monetary
    pub amount: Option<Money>,
    /// Time the item entered the inbox
    pub requested_at: DateTime<Utc>,
    /// Decision state
    #[status]
    pub status: ApprovalStatus,
    /// Reviewer comment
    pub comment: Option<String>,
    /// Time of the decision
    pub decided_at: Option<DateTime<Utc>>,
}

impl Approvable for Approval {
    fn approved_status() -> ApprovalStatus {
        ApprovalStatus::Approved
    }

    fn rejected_status() -> ApprovalStatus {
        ApprovalStatus::Rejected
    }

    fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }

    fn record_decision(&mut self, comment: Option<String>, decided_at: DateTime<Utc>) {
        self.comment = comment;
        self.decided_at = Some(decided_at);
    }
}
