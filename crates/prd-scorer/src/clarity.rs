use crate::model::{Category, CategoryResult};
use crate::patterns;

/// Scores precision, user-story completeness, measurability and
/// prioritization. Max 30. The four sub-scores are independent.
pub fn score_requirements_clarity(text: &str) -> CategoryResult {
    let mut issues = Vec::new();

    let vague = patterns::detect_vague_qualifiers(text).len();
    let precision = match vague {
        0 => 8,
        1..=2 => 6,
        3..=5 => 4,
        _ => {
            issues.push(format!("Found {vague} vague qualifiers"));
            2
        }
    };

    let completeness = match patterns::count_user_stories(text) {
        3.. => 8,
        1..=2 => 5,
        0 => {
            issues.push("No user stories found".to_string());
            0
        }
    };

    let measurability = match patterns::count_measurable_requirements(text) {
        5.. => 8,
        2..=4 => 5,
        1 => 2,
        0 => {
            issues.push("No measurable requirements".to_string());
            0
        }
    };

    let prioritization = if patterns::detect_prioritization(text).is_prioritized() {
        6
    } else {
        issues.push("No prioritization (MoSCoW or P0/P1/P2)".to_string());
        0
    };

    CategoryResult::clamped(
        Category::Clarity,
        precision + completeness + measurability + prioritization,
        issues,
    )
}
