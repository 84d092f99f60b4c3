//! Risk and priority classification for queued tasks (§4.4 step-2
//! "Classify risk ∈ {safe, dangerous} and priority").

use serde::{Deserialize, Serialize};

/// Whether a task's side effects are reversible without human
/// intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Risk {
    Safe,
    Dangerous,
}

/// Relative importance, used only for presentation/ordering by callers —
/// the scheduler itself processes tasks in registration order regardless
/// of priority (§4.4 "Ordering guarantees").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
}

/// A classifier decision for one task.
#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub risk: Risk,
    pub priority: Priority,
}

/// `LLMClassifier` (Tier 0, §6): `classify(text, choices) → choice` with a
/// caller-supplied timeout and a deterministic fallback if unreachable.
/// Task risk/priority classification is expressed against this same
/// collaborator shape so a real implementation can delegate to an LLM
/// while tests use [`DeterministicClassifier`].
pub trait TaskClassifier: Send + Sync {
    fn classify(&self, task_name: &str, description: &str) -> Classification;
}

/// A keyword-driven stand-in for an LLM classifier. Tasks whose name or
/// description mentions an irreversible-sounding verb are `Dangerous`;
/// everything else is `Safe`. This mirrors the pipeline's
/// [`tdg_pipeline::classify::DefaultKeywordClassifier`] approach of a
/// deterministic fallback that needs no network access.
pub struct DeterministicClassifier {
    dangerous_keywords: Vec<String>,
}

impl Default for DeterministicClassifier {
    fn default() -> Self {
        Self {
            dangerous_keywords: [
                "delete", "force", "push", "deploy", "drop", "rm ", "destroy", "revoke",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl DeterministicClassifier {
    pub fn with_dangerous_keywords(keywords: Vec<String>) -> Self {
        Self {
            dangerous_keywords: keywords,
        }
    }
}

impl TaskClassifier for DeterministicClassifier {
    fn classify(&self, task_name: &str, description: &str) -> Classification {
        let haystack = format!("{task_name} {description}").to_lowercase();
        let risk = if self
            .dangerous_keywords
            .iter()
            .any(|kw| haystack.contains(kw.as_str()))
        {
            Risk::Dangerous
        } else {
            Risk::Safe
        };
        let priority = if risk == Risk::Dangerous {
            Priority::High
        } else {
            Priority::Normal
        };
        Classification { risk, priority }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_sounding_tasks_classify_as_dangerous() {
        let classifier = DeterministicClassifier::default();
        let c = classifier.classify("cleanup_stale_branches", "git push --force to prune");
        assert_eq!(c.risk, Risk::Dangerous);
    }

    #[test]
    fn ordinary_tasks_classify_as_safe() {
        let classifier = DeterministicClassifier::default();
        let c = classifier.classify("summarize_inbox", "read unread messages and summarize");
        assert_eq!(c.risk, Risk::Safe);
        assert_eq!(c.priority, Priority::Normal);
    }
}
