//! Trust signals and category frequency aggregates (§3).

use crate::categories::Category;
use serde::{Deserialize, Serialize};

/// Produced when a keyword in a processed document is attributed to a
/// category (§3 "Trust Signal").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustSignal {
    pub keyword: String,
    pub category: Category,
    /// `[0, 1]` — confidence of the keyword → category attribution.
    pub confidence: f64,
    pub context: String,
    pub document_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl TrustSignal {
    pub fn clamped_confidence(&self) -> f64 {
        self.confidence.clamp(0.0, 1.0)
    }
}

/// `{category, count, keywords, percentage, rank}` — §3. Percentages across
/// all 20 entries sum to `100 ± 0.1` (P8).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFrequency {
    pub category: Category,
    pub count: u64,
    pub keywords: Vec<String>,
    pub percentage: f64,
    pub rank: u32,
}

/// Derives ranked, percentage-normalized frequencies from raw per-category
/// keyword counts. Used by step 1's corpus-wide histogram and step 2's
/// weighting; guarantees P8 by construction (residue from integer rounding
/// of percentages is not introduced — percentages stay `f64`).
pub fn frequencies_from_counts(
    counts: &crate::types::collections::FxHashMap<Category, (u64, Vec<String>)>,
) -> Vec<CategoryFrequency> {
    let total: u64 = counts.values().map(|(c, _)| *c).sum();
    let mut entries: Vec<CategoryFrequency> = Category::all()
        .into_iter()
        .map(|cat| {
            let (count, keywords) = counts
                .get(&cat)
                .cloned()
                .unwrap_or((0, Vec::new()));
            let percentage = if total == 0 {
                0.0
            } else {
                (count as f64 / total as f64) * 100.0
            };
            CategoryFrequency {
                category: cat,
                count,
                keywords,
                percentage,
                rank: 0,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.flat().cmp(b.category.flat())));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = (i + 1) as u32;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::collections::FxHashMap;

    #[test]
    fn percentages_sum_to_100() {
        let mut counts: FxHashMap<Category, (u64, Vec<String>)> = FxHashMap::default();
        counts.insert(Category::Security, (30, vec!["auth".into()]));
        counts.insert(Category::Testing, (70, vec!["assert".into()]));
        let freqs = frequencies_from_counts(&counts);
        let sum: f64 = freqs.iter().map(|f| f.percentage).sum();
        assert!((sum - 100.0).abs() < 0.1, "sum was {sum}");
    }

    #[test]
    fn zero_total_yields_zero_percentages() {
        let counts: FxHashMap<Category, (u64, Vec<String>)> = FxHashMap::default();
        let freqs = frequencies_from_counts(&counts);
        assert!(freqs.iter().all(|f| f.percentage == 0.0));
    }
}
