//! Domain entities.
//!
//! Every entity is a flat record with an id, optional foreign keys by
//! convention (`project_id` and friends are not checked) and, where it has a
//! lifecycle, a closed status enum. Status enums serialize as snake_case
//! labels.

/// Declares a closed set of labels serialized as fixed strings
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Serialized label
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod approval;
pub mod contract;
pub mod design;
pub mod employee;
pub mod payment;
pub mod project;
pub mod tender;
pub mod work_package;

pub use approval::{Approval, ApprovalKind, ApprovalPatch, ApprovalStatus};
pub use contract::{Contract, ContractPatch, ContractStatus};
pub use design::{DesignRequest, DesignRequestPatch, DesignStatus, Discipline, Priority};
pub use employee::{Employee, EmployeePatch, EmployeeStatus};
pub use payment::{PaymentRequest, PaymentRequestPatch, PaymentStatus};
pub use project::{Project, ProjectPatch, ProjectStatus};
pub use tender::{Tender, TenderPatch, TenderStatus};
pub use work_package::{
    WorkPackage, WorkPackageAction, WorkPackagePatch, WorkPackageReducer, WorkPackageStatus,
};
