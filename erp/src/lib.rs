//! # Groundwork ERP
//!
//! In-memory data core for a construction company: projects, tenders,
//! contracts, payment requests, employees, design requests, work packages
//! and an approval inbox.
//!
//! Each entity type lives in a [`registry::Registry`] backed by a store and
//! reducer from `groundwork-runtime` / `groundwork-core`. A
//! [`workspace::Workspace`] owns one registry per type and is seeded from
//! static mock data or a JSON file.
//!
//! ## Example
//!
//! ```ignore
//! use groundwork_erp::{ErpConfig, Workspace};
//! use groundwork_core::environment::SystemClock;
//!
//! let config = ErpConfig::from_env()?;
//! let mut workspace = Workspace::from_config(&config, Arc::new(SystemClock))?;
//!
//! let id = PaymentRequestId::from("PAY-003");
//! workspace.payment_requests.approve(&id, Some("Certified".to_string()))?;
//! assert!(workspace.payment_requests.pending().iter().all(|p| p.id != id));
//! ```

pub mod config;
pub mod dashboard;
pub mod entities;
pub mod error;
pub mod ids;
pub mod money;
pub mod registry;
pub mod seed;
pub mod workspace;

pub use config::ErpConfig;
pub use dashboard::{Dashboard, ProjectSummary};
pub use error::{ConfigError, ErpError, SeedError};
pub use money::Money;
pub use seed::Seed;
pub use workspace::Workspace;
