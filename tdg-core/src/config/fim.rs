//! FIM permission-engine configuration (§6: `fim: {threshold=0.8,
//! maxTrustDebtUnits=3000, k_E=0.003}`).

use crate::constants::{DEFAULT_K_E, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FimConfig {
    pub threshold: Option<f64>,
    pub max_trust_debt_units: Option<f64>,
    pub k_e: Option<f64>,
    /// Sophistication discount applied by step 4 (§9: "preserve it as a
    /// configuration field").
    pub sophistication_discount: Option<f64>,
}

impl FimConfig {
    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    pub fn effective_max_trust_debt_units(&self) -> f64 {
        self.max_trust_debt_units
            .unwrap_or(crate::categories::MAX_TRUST_DEBT_UNITS)
    }

    pub fn effective_k_e(&self) -> f64 {
        self.k_e.unwrap_or(DEFAULT_K_E)
    }

    pub fn effective_sophistication_discount(&self) -> f64 {
        self.sophistication_discount
            .unwrap_or(crate::constants::DEFAULT_SOPHISTICATION_DISCOUNT)
    }
}
