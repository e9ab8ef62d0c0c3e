//! Migration logic between `bigctl-api` and the `bigctl` binary.
//!
//! - **[`ApplianceConfig`]**: resolved connection settings; builds a
//!   [`BigIpClient`](bigctl_api::BigIpClient).
//! - **[`classify`]**: buckets a raw HTTP status + body into an [`Outcome`]
//!   for display. Classification never changes control flow.
//! - **[`MigrationPlan`]**: the ordered table of pools and member addresses.
//! - **[`Migrator`]**: walks a plan strictly in order, one request per
//!   member, asking an injected [`Confirm`] before removals and handing each
//!   result to a [`Reporter`].

pub mod classify;
pub mod config;
pub mod error;
pub mod migration;
pub mod plan;

pub use classify::{Outcome, classify, classify_response};
pub use config::ApplianceConfig;
pub use error::CoreError;
pub use migration::{
    AutoApprove, Confirm, MemberResult, MemberTarget, MigrationMode, MigrationSummary, Migrator,
    Reporter,
};
pub use plan::{MigrationPlan, PoolPlan};
