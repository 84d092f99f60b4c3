//! FIM geometric permission engine (§4.3): a pure `(IdentityVector,
//! ActionRequirement) → PermissionDecision` function, a drift decay model
//! that penalizes sovereignty on every denial, a built-in requirement
//! catalog, and a stateful [`PermissionEngine`] that wires the two
//! together with the append-only deny log.

pub mod catalog;
pub mod deny_log;
pub mod drift;
pub mod engine;
pub mod overlap;
pub mod permission;

pub use catalog::{default_requirements, get_requirement};
pub use deny_log::DenyLogEntry;
pub use drift::{decayed_sovereignty, decayed_sovereignty_default, drift_events_until_zero, recovery_path, sovereignty_raw};
pub use engine::PermissionEngine;
pub use overlap::{compute_overlap, failed_categories};
pub use permission::{check_permission, check_permission_default};
