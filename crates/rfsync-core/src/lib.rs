//! RF profile reconciliation engine between `rfsync-api` and the CLI.
//!
//! A run flows strictly one way:
//!
//! - **Snapshot** ([`snapshot`]) captures the [`Baseline`]: every wireless
//!   network of the organization and the RF profiles it already holds.
//!   Any failure here aborts the run.
//!
//! - **Loaders** ([`templates`], [`assignments`]) read the desired state: a
//!   directory of YAML profile templates and a CSV assignment sheet. A
//!   missing input is a retryable precondition
//!   ([`CoreError::is_retryable`]), not a fatal error.
//!
//! - **Validation** ([`validate()`]) cross-checks every sheet row against the
//!   baseline and the templates, rejecting bad rows whole and merging the
//!   rest into a [`ChangeSet`].
//!
//! - **Apply** ([`apply()`]) creates or updates each staged profile and binds
//!   it to its access points, isolating failures per network and profile.
//!
//! The engine only reaches the dashboard through the [`Dashboard`] trait,
//! implemented for [`rfsync_api::DashboardClient`].

pub mod apply;
pub mod assignments;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod snapshot;
pub mod templates;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use apply::{ApplyEvent, ApplyFailure, ApplyReport, ApplyStage, apply};
pub use assignments::{load_assignments, read_assignments};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use snapshot::{build_baseline, fetch_networks, find_network, select_organization};
pub use templates::{TemplateSet, export_profiles, load_templates, template_file_name};
pub use validate::{Rejection, RejectionKind, ValidationReport, validate};

pub use model::{
    ApTargets, AssignmentRow, Baseline, ChangeSet, NetworkBaseline, NetworkChange, Operation,
    PlanRow, ProfileChange, ProfileDocument,
};

// Dashboard types the engine hands back to callers.
pub use rfsync_api::{DashboardClient, Device, Network, Organization};
