// ── Domain model ──
//
// Canonical types shared by the loaders, the validator and the applier.

pub mod assignment;
pub mod baseline;
pub mod change_set;
pub mod profile;

pub use assignment::{ALL_APS, ASSIGNMENT_COLUMNS, ApTargets, AssignmentRow, NO_APS};
pub use baseline::{Baseline, NetworkBaseline, network_key};
pub use change_set::{ChangeSet, NetworkChange, Operation, PlanRow, ProfileChange};
pub use profile::ProfileDocument;
