//! The stateful permission engine — wires `checkPermission`, the deny log,
//! and the drift decay model into a single entry point for callers that
//! gate tool invocations in-process (§4.3).

use std::path::{Path, PathBuf};

use tdg_core::errors::FimError;
use tdg_core::types::identity::IdentityVector;
use tdg_core::types::requirement::{ActionRequirement, PermissionDecision};

use crate::deny_log::{self, DenyLogEntry};
use crate::drift;
use crate::permission::check_permission;

/// Owns the path to the deny log and the decay constant, and applies
/// drift decay to an identity's sovereignty before every check.
pub struct PermissionEngine {
    deny_log_path: PathBuf,
    threshold: f64,
    k_e: f64,
}

impl PermissionEngine {
    pub fn new(deny_log_path: impl Into<PathBuf>, threshold: f64, k_e: f64) -> Self {
        Self {
            deny_log_path: deny_log_path.into(),
            threshold,
            k_e,
        }
    }

    pub fn deny_log_path(&self) -> &Path {
        &self.deny_log_path
    }

    /// The number of drift events recorded so far.
    pub fn drift_events(&self) -> Result<u64, FimError> {
        deny_log::count(&self.deny_log_path)
    }

    /// Decays `identity`'s sovereignty by the current drift-event count
    /// and checks it against `requirement`. On denial, appends a deny-log
    /// entry — the caller never has to remember to log a deny itself.
    pub fn check(
        &self,
        identity: &IdentityVector,
        requirement: &ActionRequirement,
    ) -> Result<PermissionDecision, FimError> {
        let drift_events = self.drift_events()?;
        let decayed = identity.with_sovereignty(drift::decayed_sovereignty(
            identity.sovereignty_score,
            drift_events,
            self.k_e,
        ));
        let decision = check_permission(&decayed, requirement, self.threshold);

        if !decision.allowed {
            deny_log::append(
                &self.deny_log_path,
                &DenyLogEntry {
                    ts: chrono::Utc::now(),
                    tool: requirement.tool_name.clone(),
                    overlap: decision.overlap,
                    sovereignty: decision.sovereignty,
                    failed_categories: decision.failed_categories.clone(),
                },
            )?;
        }

        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tdg_core::categories::Category;
    use tdg_core::constants::DEFAULT_THRESHOLD;
    use tdg_core::types::collections::FxHashMap;

    fn identity(scores: &[(Category, f64)]) -> IdentityVector {
        let mut map = FxHashMap::default();
        for (c, v) in scores {
            map.insert(*c, *v);
        }
        IdentityVector::new("u1", Utc::now(), map)
    }

    #[test]
    fn denial_is_appended_to_the_log_and_increments_drift_events() {
        let dir = tempfile::tempdir().unwrap();
        let engine = PermissionEngine::new(
            dir.path().join("fim-deny-log.jsonl"),
            DEFAULT_THRESHOLD,
            tdg_core::constants::DEFAULT_K_E,
        );

        let iv = identity(&[(Category::Security, 0.2)]);
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.9);
        let req = ActionRequirement::new("shell_execute", required, 0.0, "");

        assert_eq!(engine.drift_events().unwrap(), 0);
        let decision = engine.check(&iv, &req).unwrap();
        assert!(!decision.allowed);
        assert_eq!(engine.drift_events().unwrap(), 1);
    }

    #[test]
    fn allowed_checks_do_not_record_a_drift_event() {
        let dir = tempfile::tempdir().unwrap();
        let engine = PermissionEngine::new(
            dir.path().join("fim-deny-log.jsonl"),
            DEFAULT_THRESHOLD,
            tdg_core::constants::DEFAULT_K_E,
        );
        let iv = identity(&Category::all().map(|c| (c, 1.0)));
        let req = ActionRequirement::unconditional("noop");
        let decision = engine.check(&iv, &req).unwrap();
        assert!(decision.allowed);
        assert_eq!(engine.drift_events().unwrap(), 0);
    }

    #[test]
    fn repeated_denials_decay_sovereignty_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let engine = PermissionEngine::new(
            dir.path().join("fim-deny-log.jsonl"),
            DEFAULT_THRESHOLD,
            tdg_core::constants::DEFAULT_K_E,
        );
        let iv = identity(&[(Category::Security, 0.5)]);
        let mut required = FxHashMap::default();
        required.insert(Category::Security, 0.99);
        let req = ActionRequirement::new("shell_execute", required, 0.0, "");

        let first = engine.check(&iv, &req).unwrap();
        let second = engine.check(&iv, &req).unwrap();
        assert!(second.sovereignty <= first.sovereignty);
    }
}
