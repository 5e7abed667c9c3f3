//! Contracts with subcontractors and suppliers.

use crate::ids::{ContractId, ProjectId, TenderId};
use crate::money::Money;
use chrono::NaiveDate;
use groundwork_macros::Entity;
use serde::{Deserialize, Serialize};

label_enum! {
    /// Stage of a contract
    ContractStatus {
        /// Being drafted
        Draft => "draft",
        /// Terms under negotiation
        Negotiation => "negotiation",
        /// Waiting for sign-off
        PendingApproval => "pending_approval",
        /// Signed and running
        Active => "active",
        /// All obligations met
        Completed => "completed",
        /// Ended early
        Terminated => "terminated",
    }
}

/// A contract, usually the result of an awarded tender
#[derive(Entity, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Contract id
    #[id]
    pub id: ContractId,
    /// Owning project
    pub project_id: ProjectId,
    /// Tender the contract was awarded from, if any
    pub tender_id: Option<TenderId>,
    /// Contract number
    pub number: String,
    /// Scope title
    pub title: String,
    /// Contracting party
    pub contractor: String,
    /// Contract sum
    pub value: Money,
    /// Share of each payment held back until completion
    pub retention_percent: u8,
    /// Start on site
    pub start_date: NaiveDate,
    /// Contractual completion
    pub end_date: NaiveDate,
    /// Date both parties signed
    pub signed_date: Option<NaiveDate>,
    /// Stage
    #[status]
    pub status: ContractStatus,
}

impl Contract {
    /// Returns true if the contract is signed and running
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ContractStatus::Active
    }

    /// Retention held on the full contract sum
    #[must_use]
    pub fn retention_amount(&self) -> Money {
        self.value.percent(self.retention_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_is_a_share_of_value() {
        let contract = Contract {
            id: ContractId::from("CTR-001"),
            project_id: ProjectId::from("PRJ-001"),
            tender_id: None,
            number: "C-2025-001".to_string(),
            title: "Groundworks".to_string(),
            contractor: "Deepdig Civils".to_string(),
            value: Money::from_major(480_000),
            retention_percent: 5,
            start_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 29).unwrap(),
            signed_date: None,
            status: ContractStatus::PendingApproval,
        };

        assert_eq!(contract.retention_amount(), Money::from_major(24_000));
        assert!(!contract.is_active());
    }
}
