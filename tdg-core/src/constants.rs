//! Calibrated constants (§4.2, §4.3, §9).
//!
//! The source specified two drift rates (`k_E = 0.003` in the auth module
//! vs. `k_E = 0.01` in a scheduler comment); §9 resolves this in favor of
//! the auth-module value because it alone satisfies the calibration
//! invariant P6/S6 (`driftEvents=1000 → sovereignty ∈ [0.048, 0.050]`).

/// Per-event entropic decay rate applied by the drift model (§4.3).
pub const DEFAULT_K_E: f64 = 0.003;

/// Default overlap threshold for `checkPermission` (§4.3).
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Overlap at or above which an allowed decision is `trusted` rather than
/// `general` (§4.3 "Tiering").
pub const TRUSTED_OVERLAP: f64 = 0.95;

/// Sophistication discount applied in step 4's grade computation (§4.2,
/// §9: "preserve it as a configuration field" — this is only the default).
pub const DEFAULT_SOPHISTICATION_DISCOUNT: f64 = 0.30;

/// Process-health factor default, used when step 2's governance report is
/// unavailable (§4.2 step 4).
pub const DEFAULT_PROCESS_HEALTH: f64 = 0.8;

/// Default last-30-days commit window for step 0 (§4.2 step 0).
pub const DEFAULT_COMMIT_WINDOW_DAYS: i64 = 30;

/// Cold-spot severity thresholds (§4.2 step 6): `frozen<0.25 < arctic<0.40
/// < cold<0.60 < cool<0.65`.
pub const COLD_SPOT_THRESHOLD: f64 = 0.65;
pub const COOL_THRESHOLD: f64 = 0.60;
pub const ARCTIC_THRESHOLD: f64 = 0.40;
pub const FROZEN_THRESHOLD: f64 = 0.25;

/// Orthogonality pass/fail threshold (§4.2 step 2): "documentary; passed=false
/// is non-fatal but must be surfaced".
pub const ORTHOGONALITY_MAX_AVG_CORRELATION: f64 = 0.01;

/// Balance pass/fail threshold (§4.2 step 2).
pub const BALANCE_MAX_GINI: f64 = 0.4;

/// Concentration-risk threshold (§4.2 step 6): one category > 20% of total debt.
pub const CONCENTRATION_RISK_FRACTION: f64 = 0.20;

/// Minimum cluster size for an "adjacency cluster" asymmetric pattern (§4.2 step 6).
pub const ADJACENCY_CLUSTER_MIN: usize = 3;
