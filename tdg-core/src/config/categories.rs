//! Category overrides (§6 "categories: {…optional overrides…}").
//!
//! Two coexisting category spaces are a historical accident (§9): the flat
//! 20-category space is always authoritative; ShortLex ids are purely a
//! rendering overlay that configuration may customize per category, and
//! whose presence is what unlocks the 45×45 sub-category matrix variant in
//! step 3 instead of the 20×20 default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CategoryOverride {
    pub shortlex: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub weight: Option<f64>,
}

/// Keyed by flat category id, e.g. `"security"`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CategoryOverrides {
    pub entries: BTreeMap<String, CategoryOverride>,
}

impl CategoryOverrides {
    /// True once any entry supplies a ShortLex sub-category label distinct
    /// from the default 20-entry scheme, i.e. the configuration opts into
    /// the 45×45 matrix variant (§9).
    pub fn has_sub_category_shortlex(&self) -> bool {
        self.entries.values().any(|o| o.shortlex.is_some())
    }

    pub fn weight_for(&self, flat_id: &str) -> Option<f64> {
        self.entries.get(flat_id).and_then(|o| o.weight)
    }

    /// Configured ShortLex override for a flat id, if any (falls back to
    /// `Category::shortlex()` when absent).
    pub fn shortlex_for(&self, flat_id: &str) -> Option<&str> {
        self.entries
            .get(flat_id)
            .and_then(|o| o.shortlex.as_deref())
    }

    pub fn keywords_for(&self, flat_id: &str) -> Option<&[String]> {
        self.entries
            .get(flat_id)
            .and_then(|o| o.keywords.as_deref())
    }
}
