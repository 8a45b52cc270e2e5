use tracing::debug;

use crate::clarity::score_requirements_clarity;
use crate::model::ValidationResult;
use crate::structure::score_document_structure;
use crate::technical::score_technical_quality;
use crate::user_focus::score_user_focus;

/// Documents shorter than this after trimming are not scored. Length is
/// measured in UTF-16 code units, so a character outside the Basic
/// Multilingual Plane counts twice.
pub const MIN_CONTENT_CHARS: usize = 50;

/// Length used by the content guard: whitespace and byte-order marks are
/// trimmed from both ends first.
fn content_length(text: &str) -> usize {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .encode_utf16()
        .count()
}

/// Scores a document. Text under [`MIN_CONTENT_CHARS`] (after trimming)
/// yields an all-zero result with a "No content to validate" issue in every
/// category.
pub fn validate_document(text: &str) -> ValidationResult {
    if content_length(text) < MIN_CONTENT_CHARS {
        debug!(bytes = text.len(), "document too short, skipping evaluators");
        return ValidationResult::no_content();
    }

    let result = ValidationResult::from_categories(
        score_document_structure(text),
        score_requirements_clarity(text),
        score_user_focus(text),
        score_technical_quality(text),
    );

    debug!(
        total = result.total_score,
        structure = result.structure.score,
        clarity = result.clarity.score,
        user_focus = result.user_focus.score,
        technical = result.technical.score,
        "document scored"
    );
    result
}

/// Like [`validate_document`], treating a missing document as empty.
pub fn validate_optional_document(text: Option<&str>) -> ValidationResult {
    validate_document(text.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, NO_CONTENT_ISSUE};

    const MINIMAL: &str = "\
# Purpose
Help support agents resolve tickets.
## User Personas
Support agents and team leads.
## Features
As a user, I want to search tickets so that I answer faster.
As a user, I want to tag tickets so that I can triage.
As a user, I want to export tickets so that I can report.
## Success Metrics
Search responds under 200ms with 99.9% uptime.
Search is a must have.
";

    fn assert_no_content(result: &ValidationResult) {
        assert_eq!(result.total_score, 0);
        for (category, category_result) in result.categories() {
            assert_eq!(category_result.score, 0);
            assert_eq!(category_result.max_score, category.max_score());
            assert_eq!(category_result.issues, [NO_CONTENT_ISSUE]);
        }
    }

    #[test]
    fn degenerate_inputs_score_zero() {
        assert_no_content(&validate_document(""));
        assert_no_content(&validate_optional_document(None));
        assert_no_content(&validate_document("Too short!"));
        assert_no_content(&validate_document(&format!("   {}   ", "x".repeat(49))));
    }

    #[test]
    fn fifty_characters_are_scored() {
        let result = validate_document(&"x".repeat(50));
        assert_ne!(result.structure.issues, [NO_CONTENT_ISSUE]);
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        let text = format!("\u{feff}{}\u{feff}", "x".repeat(49));
        assert_no_content(&validate_document(&text));
    }

    #[test]
    fn astral_characters_count_twice() {
        // 25 emoji are 50 UTF-16 code units.
        let result = validate_document(&"\u{1f680}".repeat(25));
        assert_ne!(result.structure.issues, [NO_CONTENT_ISSUE]);
        assert_no_content(&validate_document(&"\u{1f680}".repeat(24)));
        assert_eq!(content_length("  \u{e9}t\u{e9}  "), 3);
    }

    #[test]
    fn minimal_well_structured_document() {
        let result = validate_document(MINIMAL);
        assert!(result.structure.score > 0);
        assert!(result.clarity.score > 0);
        assert!(!result
            .clarity
            .issues
            .iter()
            .any(|issue| issue == "No user stories found"));
        assert_eq!(
            result.total_score,
            result.structure.score
                + result.clarity.score
                + result.user_focus.score
                + result.technical.score
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        assert_eq!(validate_document(MINIMAL), validate_document(MINIMAL));
    }

    #[test]
    fn categories_iterate_in_fixed_order() {
        let result = validate_document(MINIMAL);
        let order: Vec<Category> = result.categories().map(|(c, _)| c).collect();
        assert_eq!(order, Category::ALL);
        assert_eq!(result.max_score(), 100);
        assert_eq!(result.color(), crate::score_color(result.total_score));
        assert_eq!(result.label(), crate::score_label(result.total_score));
    }
}
