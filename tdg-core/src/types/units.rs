//! Trust-Debt units & grade (§3 "Trust-Debt Units & Grade").

use crate::categories::{grade_of, Category, Grade};
use serde::{Deserialize, Serialize};

/// Direction a category's grade/alignment is moving, recorded by step 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

/// Per-category Trust-Debt record, as materialized by pipeline step 4
/// (§4.2 step 4, item 4: `{trustDebtUnits, grade, percentile, trend, evidence}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTrustDebt {
    pub category: Category,
    pub trust_debt_units: i64,
    pub grade: Grade,
    pub percentile: f64,
    pub trend: Trend,
    pub evidence: Vec<String>,
}

impl CategoryTrustDebt {
    /// Construct from a raw unit count, deriving the letter grade via the
    /// calibrated boundaries (§3).
    pub fn from_units(
        category: Category,
        trust_debt_units: i64,
        percentile: f64,
        trend: Trend,
        evidence: Vec<String>,
    ) -> Self {
        Self {
            category,
            trust_debt_units,
            grade: grade_of(trust_debt_units),
            percentile,
            trend,
            evidence,
        }
    }
}
