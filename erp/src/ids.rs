//! Identifier newtypes, one per entity type.
//!
//! Ids are opaque strings. Seed data uses readable ids (`PRJ-001`); ids
//! minted at runtime are the type prefix plus a random UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix of ids minted by [`Self::new`]
            pub const PREFIX: &'static str = $prefix;

            /// Creates a new random id
            #[must_use]
            pub fn new() -> Self {
                Self(format!("{}-{}", Self::PREFIX, Uuid::new_v4().simple()))
            }

            /// Returns the id as a string slice
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a project
    ProjectId,
    "PRJ"
);
entity_id!(
    /// Unique identifier for a tender
    TenderId,
    "TND"
);
entity_id!(
    /// Unique identifier for a contract
    ContractId,
    "CTR"
);
entity_id!(
    /// Unique identifier for a payment request
    PaymentRequestId,
    "PAY"
);
entity_id!(
    /// Unique identifier for an employee
    EmployeeId,
    "EMP"
);
entity_id!(
    /// Unique identifier for a design request
    DesignRequestId,
    "DRQ"
);
entity_id!(
    /// Unique identifier for a work package
    WorkPackageId,
    "WP"
);
entity_id!(
    /// Unique identifier for an approval inbox item
    ApprovalId,
    "APR"
);
