//! `(risk, sovereignty) → tier` mapping (§4.4 step 2).

use serde::{Deserialize, Serialize};

use crate::classify::Risk;

/// The tier a task is emitted under. Unlike [`tdg_fim`]'s permission
/// tiering, the scheduler never produces a `blocked` tier — a task that
/// cannot run at any tier is simply not emitted this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionTier {
    /// Auto-execute after countdown.
    Trusted,
    /// Requires a human confirmation token.
    General,
}

/// `safe ∧ sovereignty ≥ 0.6 → trusted`; `dangerous ∧ sovereignty ≥ 0.9 →
/// trusted`; otherwise `general`.
pub fn tier_for(risk: Risk, sovereignty: f64) -> InjectionTier {
    let trusted = match risk {
        Risk::Safe => sovereignty >= 0.6,
        Risk::Dangerous => sovereignty >= 0.9,
    };
    if trusted {
        InjectionTier::Trusted
    } else {
        InjectionTier::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_tasks_trust_at_a_lower_sovereignty_bar() {
        assert_eq!(tier_for(Risk::Safe, 0.6), InjectionTier::Trusted);
        assert_eq!(tier_for(Risk::Safe, 0.59), InjectionTier::General);
    }

    #[test]
    fn dangerous_tasks_require_near_perfect_sovereignty() {
        assert_eq!(tier_for(Risk::Dangerous, 0.9), InjectionTier::Trusted);
        assert_eq!(tier_for(Risk::Dangerous, 0.89), InjectionTier::General);
        assert_eq!(tier_for(Risk::Dangerous, 0.6), InjectionTier::General);
    }
}
