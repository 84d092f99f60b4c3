//! Declared goals for step 5's alignment scoring (§4.2 step 5: "For each
//! declared goal, compute alignment score and gap against a target
//! category"). Not named in §6's minimum config shape; elaborated here as
//! an optional extension per SPEC_FULL §3.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    pub name: String,
    pub category: String,
    #[serde(default = "default_target_score")]
    pub target_score: f64,
}

fn default_target_score() -> f64 {
    0.8
}
