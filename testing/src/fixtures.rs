//! Fixture entities for exercising the generic collection and workflow code.

use chrono::{DateTime, Utc};
use groundwork_core::entity::Approvable;
use groundwork_macros::Entity;

/// A flat record with a free-form string status
///
/// `approved` and `rejected` are the decision statuses; `submitted` and
/// `pending` count as waiting for a decision. Any other string is accepted.
#[derive(Entity, Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Unique id
    #[id]
    pub id: String,
    /// Free text
    pub title: String,
    /// Arbitrary amount
    pub amount: i64,
    /// Free-form status
    #[status]
    pub status: String,
    /// Decision comment
    pub comment: Option<String>,
    /// Decision time
    pub decided_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Creates a record with an empty title and zero amount
    #[must_use]
    pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            amount: 0,
            status: status.into(),
            comment: None,
            decided_at: None,
        }
    }

    /// Sets the title
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Approvable for Record {
    fn approved_status() -> String {
        "approved".to_string()
    }

    fn rejected_status() -> String {
        "rejected".to_string()
    }

    fn is_pending(&self) -> bool {
        matches!(self.status.as_str(), "submitted" | "pending")
    }

    fn record_decision(&mut self, comment: Option<String>, decided_at: DateTime<Utc>) {
        self.comment = comment;
        self.decided_at = Some(decided_at);
    }
}
