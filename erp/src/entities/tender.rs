//! Tenders issued to the market for a trade package.

use crate::ids::{ProjectId, TenderId};
use crate::money::Money;
use chrono::NaiveDate;
use groundwork_macros::Entity;
use serde::{Deserialize, Serialize};

label_enum! {
    /// Stage of a tender
    TenderStatus {
        /// Being prepared
        Draft => "draft",
        /// Issued to bidders
        Published => "published",
        /// Bids coming in
        Bidding => "bidding",
        /// Bids under evaluation
        Evaluation => "evaluation",
        /// Awarded to a bidder
        Awarded => "awarded",
        /// Withdrawn
        Cancelled => "cancelled",
    }
}

/// A tender for one trade package of a project
#[derive(Entity, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    /// Tender id
    #[id]
    pub id: TenderId,
    /// Owning project
    pub project_id: ProjectId,
    /// Reference printed on tender documents
    pub reference: String,
    /// Package title
    pub title: String,
    /// Trade, e.g. `Structural steel`
    pub trade: String,
    /// Pre-tender estimate
    pub estimated_value: Money,
    /// Last day for submissions
    pub submission_deadline: NaiveDate,
    /// Number of bids received
    pub bidders: u32,
    /// Winning bidder once awarded
    pub awarded_to: Option<String>,
    /// Stage
    #[status]
    pub status: TenderStatus,
}

impl Tender {
    /// Returns true while the tender accepts bids
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.status, TenderStatus::Published | TenderStatus::Bidding)
    }
}
