//! The built-in requirement catalog — the stringency ladder tools are
//! checked against absent an explicit per-deployment override (§3, §4.3).

use std::sync::OnceLock;

use tdg_core::categories::Category;
use tdg_core::types::collections::FxHashMap;
use tdg_core::types::requirement::ActionRequirement;

fn requirement(
    tool_name: &str,
    required: &[(Category, f64)],
    min_sovereignty: f64,
    description: &str,
) -> ActionRequirement {
    let mut scores = FxHashMap::default();
    for (category, threshold) in required {
        scores.insert(*category, *threshold);
    }
    ActionRequirement::new(tool_name, scores, min_sovereignty, description)
}

fn build_default_requirements() -> Vec<ActionRequirement> {
    vec![
        requirement(
            "shell_execute",
            &[(Category::Security, 0.4)],
            0.2,
            "run an arbitrary shell command",
        ),
        requirement(
            "file_write",
            &[(Category::Security, 0.5), (Category::DataIntegrity, 0.4)],
            0.3,
            "create or overwrite a file",
        ),
        requirement(
            "file_delete",
            &[(Category::Security, 0.6), (Category::DataIntegrity, 0.6)],
            0.5,
            "permanently remove a file",
        ),
        requirement(
            "git_push",
            &[
                (Category::Security, 0.6),
                (Category::DataIntegrity, 0.5),
                (Category::Reliability, 0.5),
            ],
            0.5,
            "push committed history to a remote",
        ),
        requirement(
            "git_force_push",
            &[
                (Category::Security, 0.8),
                (Category::DataIntegrity, 0.8),
                (Category::Reliability, 0.7),
            ],
            0.8,
            "rewrite remote history, discarding commits other clones may hold",
        ),
        requirement(
            "deploy",
            &[
                (Category::Security, 0.85),
                (Category::DataIntegrity, 0.8),
                (Category::Reliability, 0.8),
                (Category::RiskAssessment, 0.85),
            ],
            0.85,
            "ship a build to a live environment",
        ),
    ]
}

static DEFAULT_REQUIREMENTS: OnceLock<Vec<ActionRequirement>> = OnceLock::new();

/// The built-in catalog, lazily built once and shared for the process
/// lifetime. Callers that need a mutable, deployment-specific catalog
/// should clone individual entries rather than mutate this table.
pub fn default_requirements() -> &'static [ActionRequirement] {
    DEFAULT_REQUIREMENTS.get_or_init(build_default_requirements)
}

/// Looks up a built-in requirement by tool name.
pub fn get_requirement(tool_name: &str) -> Option<&'static ActionRequirement> {
    default_requirements()
        .iter()
        .find(|requirement| requirement.tool_name == tool_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_the_six_built_in_tools() {
        for tool in [
            "shell_execute",
            "file_write",
            "file_delete",
            "git_push",
            "git_force_push",
            "deploy",
        ] {
            assert!(get_requirement(tool).is_some(), "missing {tool}");
        }
        assert!(get_requirement("not_a_real_tool").is_none());
    }

    #[test]
    fn stringency_strictly_increases_along_the_escalation_ladder() {
        let ladder = [
            "shell_execute",
            "file_write",
            "file_delete",
            "git_push",
            "git_force_push",
            "deploy",
        ];
        let mut previous_min_sovereignty = -1.0;
        let mut previous_category_count = 0;
        for tool in ladder {
            let req = get_requirement(tool).unwrap();
            assert!(req.min_sovereignty >= previous_min_sovereignty);
            assert!(req.required_scores.len() >= previous_category_count);
            previous_min_sovereignty = req.min_sovereignty;
            previous_category_count = req.required_scores.len();
        }
    }

    #[test]
    fn git_force_push_requires_at_least_three_categories_and_high_sovereignty() {
        let req = get_requirement("git_force_push").unwrap();
        assert!(req.min_sovereignty >= 0.8);
        assert!(req.required_scores.len() >= 3);
        assert!(req.required_scores.values().any(|&threshold| threshold >= 0.8));
    }
}
