//! Interim payment requests raised against contracts.

use crate::ids::{ContractId, PaymentRequestId, ProjectId};
use crate::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use groundwork_core::entity::Approvable;
use groundwork_macros::Entity;
use serde::{Deserialize, Serialize};

label_enum! {
    /// Stage of a payment request
    PaymentStatus {
        /// Being prepared by the contractor
        Draft => "draft",
        /// Submitted for certification
        Submitted => "submitted",
        /// Queued with the approver
        Pending => "pending",
        /// Certified for payment
        Approved => "approved",
        /// Paid out
        Paid => "paid",
        /// Matched against the bank statement
        Reconciled => "reconciled",
        /// Returned to the contractor
        Rejected => "rejected",
    }
}

/// A request for an interim payment under a contract
#[derive(Entity, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Payment request id
    #[id]
    pub id: PaymentRequestId,
    /// Owning project
    pub project_id: ProjectId,
    /// Contract the work was done under
    pub contract_id: ContractId,
    /// Application number
    pub number: String,
    /// Contracting party
    pub contractor: String,
    /// Valuation period, e.g. `2025-03`
    pub period: String,
    /// Gross amount applied for
    pub amount: Money,
    /// Retention withheld from this application
    pub retention: Money,
    /// Date of submission
    pub submitted_date: Option<NaiveDate>,
    /// Stage
    #[status]
    pub status: PaymentStatus,
    /// Reviewer comment from the last decision
    pub comment: Option<String>,
    /// Time of the last decision
    pub decided_at: Option<DateTime<Utc>>,
}

impl PaymentRequest {
    /// Amount after retention, saturating at the `i64` bounds
    #[must_use]
    pub fn net_payable(&self) -> Money {
        self.amount - self.retention
    }

    /// Returns true once the money has left the account
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.status, PaymentStatus::Paid | PaymentStatus::Reconciled)
    }
}

impl Approvable for PaymentRequest {
    fn approved_status() -> PaymentStatus {
        PaymentStatus::Approved
    }

    fn rejected_status() -> PaymentStatus {
        PaymentStatus::Rejected
    }

    fn is_pending(&self) -> bool {
        matches!(self.status, PaymentStatus::Submitted | PaymentStatus::Pending)
    }

    fn record_decision(&mut self, comment: Option<String>, decided_at: DateTime<Utc>) {
        self.comment = comment;
        self.decided_at = Some(decided_at);
    }
}
