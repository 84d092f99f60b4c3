//! Drift decay and recovery forecasting (§4.4).
//!
//! Sovereignty decays geometrically with every drift event. The model is
//! deliberately simple: a single per-event decay constant `k_E`, applied
//! multiplicatively, never additively — so recovery is always expressible
//! as "how many decay steps would it take to undo this."

use tdg_core::categories::MAX_TRUST_DEBT_UNITS;
use tdg_core::constants::DEFAULT_K_E;

/// `sovereignty_raw = clip(1 - trustDebtUnits / MAX, 0, 1)` (§4.4).
pub fn sovereignty_raw(trust_debt_units: f64) -> f64 {
    (1.0 - trust_debt_units / MAX_TRUST_DEBT_UNITS).clamp(0.0, 1.0)
}

/// `sovereignty' = sovereignty_raw * (1 - k_E) ^ driftEvents` (P6).
///
/// Calibrated so that `sovereignty_raw = 1.0` with `driftEvents = 1000`
/// and the default `k_E = 0.003` lands near `0.049`.
pub fn decayed_sovereignty(sovereignty_raw: f64, drift_events: u64, k_e: f64) -> f64 {
    sovereignty_raw * (1.0 - k_e).powi(drift_events as i32)
}

/// `decayed_sovereignty` using the default decay constant.
pub fn decayed_sovereignty_default(sovereignty_raw: f64, drift_events: u64) -> f64 {
    decayed_sovereignty(sovereignty_raw, drift_events, DEFAULT_K_E)
}

/// A sovereignty reading below this is treated as exhausted (P7).
const ZERO_EPSILON: f64 = 1e-6;

/// The least `driftEvents` count `n` such that `current × (1 − k_E)^n <
/// 1e-6` (P7), or `None` if `current` is already below the threshold (no
/// events needed) or the decay never crosses it within a reasonable
/// horizon.
pub fn drift_events_until_zero(current: f64, k_e: f64) -> Option<u64> {
    if current < ZERO_EPSILON {
        return Some(0);
    }
    let mut value = current;
    let decay = 1.0 - k_e;
    for events in 1..=1_000_000u64 {
        value *= decay;
        if value < ZERO_EPSILON {
            return Some(events);
        }
    }
    None
}

/// Sovereignty at each of `stages` evenly spaced points between `0` and
/// `drift_events`, tracing the decay curve a caller can present as a
/// "what would recovery look like" forecast (§4.4).
pub fn recovery_path(current_units: f64, drift_events: u64, stages: u32) -> Vec<(u64, f64)> {
    let stages = stages.max(1);
    let raw = sovereignty_raw(current_units);
    (0..=stages)
        .map(|stage| {
            let events_at_stage = (drift_events as u128 * stage as u128 / stages as u128) as u64;
            (events_at_stage, decayed_sovereignty_default(raw, events_at_stage))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sovereignty_raw_clips_to_unit_interval() {
        assert_eq!(sovereignty_raw(-100.0), 1.0);
        assert_eq!(sovereignty_raw(MAX_TRUST_DEBT_UNITS * 2.0), 0.0);
        assert!((sovereignty_raw(0.0) - 1.0).abs() < 1e-12);
    }

    // P6 / S6
    #[test]
    fn calibration_point_matches_spec_band() {
        let decayed = decayed_sovereignty_default(1.0, 1000);
        assert!(
            (0.048..=0.050).contains(&decayed),
            "got {decayed}, expected within [0.048, 0.050]"
        );
    }

    #[test]
    fn zero_drift_events_is_identity() {
        assert_eq!(decayed_sovereignty_default(0.73, 0), 0.73);
    }

    #[test]
    fn decay_is_monotonically_non_increasing_in_events() {
        let a = decayed_sovereignty_default(0.8, 10);
        let b = decayed_sovereignty_default(0.8, 11);
        assert!(b <= a);
    }

    #[test]
    fn recovery_path_starts_at_current_and_ends_at_target() {
        let path = recovery_path(0.0, 1000, 4);
        assert_eq!(path.first().unwrap().0, 0);
        assert_eq!(path.last().unwrap().0, 1000);
        assert!((path.first().unwrap().1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn drift_events_until_zero_is_zero_for_already_zero_sovereignty() {
        assert_eq!(drift_events_until_zero(0.0, DEFAULT_K_E), Some(0));
    }

    // P7
    #[test]
    fn drift_events_until_zero_is_the_least_n_crossing_the_epsilon() {
        let n = drift_events_until_zero(1.0, DEFAULT_K_E).unwrap();
        let at_n = decayed_sovereignty_default(1.0, n);
        let at_n_minus_one = decayed_sovereignty_default(1.0, n - 1);
        assert!(at_n < ZERO_EPSILON);
        assert!(at_n_minus_one >= ZERO_EPSILON);
    }
}
