//! Entity traits shared by every collection.
//!
//! An entity is a flat record with a unique identifier. Updates are expressed
//! as a `Patch`: a struct of optional fields where `None` means "keep the
//! current value". The id is never part of a patch.
//!
//! These traits are normally implemented with `#[derive(Entity)]` from
//! `groundwork-macros`, which generates the patch struct as well:
//!
//! ```ignore
//! #[derive(Entity, Clone, Debug, PartialEq)]
//! pub struct Tender {
//!     #[id]
//!     pub id: TenderId,
//!     pub title: String,
//!     #[status]
//!     pub status: TenderStatus,
//! }
//!
//! // Generated: `TenderPatch { title: Option<String>, status: Option<TenderStatus> }`
//! ```

use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::hash::Hash;

/// A record identified by a unique id
pub trait Entity: Clone + Debug {
    /// Identifier type
    type Id: Clone + Debug + Eq + Hash;

    /// Partial update type, one optional slot per non-id field
    type Patch: Clone + Debug + Default + PartialEq;

    /// Returns the id of this entity
    fn id(&self) -> &Self::Id;

    /// Shallow-merge `patch` onto this entity
    ///
    /// Fields left as `None` in the patch keep their current value.
    fn apply(&mut self, patch: Self::Patch);
}

/// An entity with a status field
///
/// Status is a label. Any value may replace any other; there is no
/// transition table.
pub trait Stateful: Entity {
    /// Closed enumeration of statuses for this entity type
    type Status: Clone + Debug + PartialEq;

    /// Returns the current status
    fn status(&self) -> &Self::Status;

    /// Overwrites the current status
    fn set_status(&mut self, status: Self::Status);
}

/// A stateful entity that can be approved or rejected
pub trait Approvable: Stateful {
    /// Status assigned by an approval
    fn approved_status() -> Self::Status;

    /// Status assigned by a rejection
    fn rejected_status() -> Self::Status;

    /// Returns true while the entity is waiting for a decision
    fn is_pending(&self) -> bool;

    /// Attach the decision comment and the time it was made
    fn record_decision(&mut self, comment: Option<String>, decided_at: DateTime<Utc>);
}

/// Approval outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Entity was approved
    Approve,
    /// Entity was rejected
    Reject,
}

impl Decision {
    /// Status an [`Approvable`] entity takes for this decision
    #[must_use]
    pub fn status<T: Approvable>(self) -> T::Status {
        match self {
            Self::Approve => T::approved_status(),
            Self::Reject => T::rejected_status(),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
