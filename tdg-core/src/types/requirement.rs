//! Action requirements and permission decisions — the types that flow
//! across the FIM permission engine boundary (§3, §4.3).

use crate::categories::Category;
use crate::types::collections::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `{toolName, requiredScores, minSovereignty, description}` — §3.
///
/// An empty `required_scores` together with `min_sovereignty = 0` yields
/// an unconditionally-allowed action (P1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequirement {
    pub tool_name: String,
    pub required_scores: FxHashMap<Category, f64>,
    pub min_sovereignty: f64,
    pub description: String,
}

impl ActionRequirement {
    pub fn new(
        tool_name: impl Into<String>,
        required_scores: FxHashMap<Category, f64>,
        min_sovereignty: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            required_scores,
            min_sovereignty,
            description: description.into(),
        }
    }

    /// The unconditionally-allowed requirement (P1).
    pub fn unconditional(tool_name: impl Into<String>) -> Self {
        Self::new(tool_name, FxHashMap::default(), 0.0, "no requirements")
    }
}

/// A single category that failed to meet its threshold, rendered as
/// `"{category}:{actual}<{required}"` to match the literal scenario
/// expectations in §8 (S2: `failedCategories=["reliability:0.4<0.5"]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedCategory {
    pub category: Category,
    pub actual: f64,
    pub required: f64,
}

impl fmt::Display for FailedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}<{}", self.category, self.actual, self.required)
    }
}

/// `{allowed, overlap, sovereignty, failedCategories, requirement}` — §3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionDecision {
    pub allowed: bool,
    pub overlap: f64,
    pub sovereignty: f64,
    pub failed_categories: Vec<FailedCategory>,
    pub requirement: ActionRequirement,
}

/// Tiers a caller may map a decision onto (§4.3 "Tiering").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// `allowed ∧ overlap ≥ 0.95` — auto-execute after countdown.
    Trusted,
    /// `allowed` but not trusted — requires human confirmation.
    General,
    /// not `allowed`.
    Blocked,
}

impl PermissionDecision {
    /// Maps this decision to a `{trusted, general, blocked}` tier per §4.3.
    pub fn tier(&self) -> Tier {
        if self.allowed && self.overlap >= 0.95 {
            Tier::Trusted
        } else if self.allowed {
            Tier::General
        } else {
            Tier::Blocked
        }
    }
}
