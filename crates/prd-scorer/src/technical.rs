use crate::model::{Category, CategoryResult};
use crate::patterns;

/// Scores non-functional coverage, acceptance criteria and the
/// dependencies/constraints section. Max 20.
pub fn score_technical_quality(text: &str) -> CategoryResult {
    let mut issues = Vec::new();

    let nfr_categories = patterns::detect_non_functional_requirements(text).len() as u32;
    let nfr = (nfr_categories * 2).min(7);
    if nfr_categories == 0 {
        issues.push("No non-functional requirements".to_string());
    }

    let acceptance = match patterns::count_acceptance_criteria(text).count() {
        3.. => 7,
        1..=2 => 4,
        0 => {
            issues.push("No Given/When/Then acceptance criteria".to_string());
            0
        }
    };

    let dependencies = if patterns::has_dependency_section(text) {
        6
    } else {
        issues.push("No dependencies/constraints section".to_string());
        0
    };

    CategoryResult::clamped(Category::Technical, nfr + acceptance + dependencies, issues)
}
