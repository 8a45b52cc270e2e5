use crate::model::{Category, CategoryResult};
use crate::patterns;

/// Scores personas, problem statement, user alignment and customer evidence.
/// Max 25.
pub fn score_user_focus(text: &str) -> CategoryResult {
    let mut issues = Vec::new();

    let personas = if patterns::has_persona_section(text) {
        7
    } else {
        issues.push("No user personas section".to_string());
        0
    };

    let problem = if patterns::has_problem_statement(text) {
        7
    } else {
        issues.push("No problem statement".to_string());
        0
    };

    // Alignment earns partial credit silently.
    let alignment = match patterns::count_user_references(text) {
        10.. => 6,
        5..=9 => 4,
        2..=4 => 2,
        _ => 0,
    };

    let evidence = if patterns::detect_customer_evidence(text).is_present() {
        5
    } else {
        0
    };

    CategoryResult::clamped(
        Category::UserFocus,
        personas + problem + alignment + evidence,
        issues,
    )
}
