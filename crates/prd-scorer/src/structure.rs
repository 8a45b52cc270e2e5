use crate::model::{Category, CategoryResult};
use crate::patterns;

const SECTION_CAP: u32 = 12;

/// Scores section coverage, heading organization, formatting and scope
/// boundaries. Max 25.
pub fn score_document_structure(text: &str) -> CategoryResult {
    let mut issues = Vec::new();

    let coverage = patterns::detect_sections(text);
    for section in &coverage.missing {
        issues.push(format!("Missing: {}", section.name));
    }
    let sections = coverage.weight().min(SECTION_CAP);

    let organization = heading_count_points(patterns::count_headings(text))
        + heading_level_points(
            patterns::has_top_level_heading(text),
            patterns::has_second_level_heading(text),
        );

    let mut formatting = 0;
    if patterns::has_bullet_list(text) {
        formatting += 2;
    }
    if patterns::has_table(text) {
        formatting += 2;
    }

    let scope = patterns::detect_scope_boundaries(text).points();

    CategoryResult::clamped(
        Category::Structure,
        sections + organization + formatting + scope,
        issues,
    )
}

fn heading_count_points(headings: usize) -> u32 {
    match headings {
        5.. => 4,
        3..=4 => 2,
        _ => 0,
    }
}

fn heading_level_points(h1: bool, h2: bool) -> u32 {
    match (h1, h2) {
        (true, true) => 3,
        (false, false) => 0,
        _ => 1,
    }
}
