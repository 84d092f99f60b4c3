//! Step 3 — ShortLex Validation & Presence Matrix (§4.2 step 3).
//!
//! Builds the asymmetric n×n presence matrix: the upper triangle
//! accumulates Reality (commit) co-occurrences, the lower triangle
//! accumulates Intent (documentation) co-occurrences, and the diagonal
//! records each category's self-consistency `|intent - reality|`.
//! Enforces ShortLex ordering along both axes (P11) before writing.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tdg_core::categories::is_shortlex_ordered;
use tdg_core::errors::StepError;
use tdg_core::{Category, CATEGORY_COUNT};

use crate::classify::DefaultKeywordClassifier;
use crate::context::RunContext;
use crate::steps::step1_document_processing::{DocumentProcessingArtifact, STEP as STEP1};
use crate::steps::{read_artifact, write_artifact};

pub const STEP: usize = 3;
pub const NAME: &str = "3-shortlex-validation";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixCell {
    pub row: String,
    pub col: String,
    pub intent: f64,
    pub reality: f64,
    pub trust_debt_units: f64,
    pub is_upper: bool,
    pub is_lower: bool,
    pub is_diagonal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlexValidationArtifact {
    pub axis_labels: Vec<String>,
    pub cells: Vec<MatrixCell>,
    pub asymmetry_ratio: f64,
    pub shortlex_ordered: bool,
    pub sub_category_variant: bool,
}

fn keyword_count(classifier: &DefaultKeywordClassifier, category: Category, keywords: &[String]) -> f64 {
    classifier
        .classify(keywords)
        .into_iter()
        .filter(|a| a.category == category)
        .count() as f64
}

pub fn run(ctx: &RunContext) -> Result<(), StepError> {
    let processed: DocumentProcessingArtifact = read_artifact(ctx, STEP1, "1-document-processing")?;
    let classifier = DefaultKeywordClassifier::with_builtin_defaults();

    let intent_keywords: Vec<String> = processed
        .documents
        .iter()
        .filter(|d| processed.intent_document_ids.contains(&d.raw.id))
        .flat_map(|d| d.keywords.clone())
        .collect();
    let reality_keywords: Vec<String> = processed
        .documents
        .iter()
        .filter(|d| processed.reality_document_ids.contains(&d.raw.id))
        .flat_map(|d| d.keywords.clone())
        .collect();

    let overrides = ctx.config.categories.as_ref();
    let sub_category_variant = overrides.map(|o| o.has_sub_category_shortlex()).unwrap_or(false);

    let mut labels: Vec<String> = Category::all()
        .iter()
        .map(|c| {
            overrides
                .and_then(|o| o.shortlex_for(c.flat()))
                .unwrap_or(c.shortlex())
                .to_string()
        })
        .collect();
    labels.sort_by(|a, b| {
        if tdg_core::categories::shortlex_le(a, b) {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Greater
        }
    });

    let intent_strength: FxHashMap<Category, f64> = Category::all()
        .into_iter()
        .map(|c| (c, keyword_count(&classifier, c, &intent_keywords)))
        .collect();
    let reality_strength: FxHashMap<Category, f64> = Category::all()
        .into_iter()
        .map(|c| (c, keyword_count(&classifier, c, &reality_keywords)))
        .collect();

    let ordered_categories: Vec<Category> = labels
        .iter()
        .map(|label| Category::from_shortlex(label).unwrap_or_else(|| {
            Category::all()
                .into_iter()
                .find(|c| {
                    overrides
                        .and_then(|o| o.shortlex_for(c.flat()))
                        .map(|s| s == label)
                        .unwrap_or(false)
                })
                .unwrap_or(Category::Security)
        }))
        .collect();

    let n = CATEGORY_COUNT;
    let mut cells = Vec::with_capacity(n * n);
    let mut upper_sum = 0.0;
    let mut lower_sum = 0.0;

    for (i, row_cat) in ordered_categories.iter().enumerate() {
        for (j, col_cat) in ordered_categories.iter().enumerate() {
            let intent = intent_strength.get(row_cat).copied().unwrap_or(0.0)
                .min(intent_strength.get(col_cat).copied().unwrap_or(0.0));
            let reality = reality_strength.get(row_cat).copied().unwrap_or(0.0)
                .min(reality_strength.get(col_cat).copied().unwrap_or(0.0));
            let is_diagonal = i == j;
            let is_upper = i < j;
            let is_lower = i > j;
            let trust_debt_units = if is_diagonal {
                (intent - reality).abs()
            } else if is_upper {
                reality
            } else {
                intent
            };
            if is_upper {
                upper_sum += trust_debt_units;
            } else if is_lower {
                lower_sum += trust_debt_units;
            }
            cells.push(MatrixCell {
                row: labels[i].clone(),
                col: labels[j].clone(),
                intent,
                reality,
                trust_debt_units,
                is_upper,
                is_lower,
                is_diagonal,
            });
        }
    }

    let artifact = ShortlexValidationArtifact {
        shortlex_ordered: is_shortlex_ordered(&labels),
        axis_labels: labels,
        cells,
        asymmetry_ratio: upper_sum / lower_sum.max(1.0),
        sub_category_variant,
    };
    write_artifact(ctx, STEP, NAME, &artifact)
}
