use serde::{Deserialize, Serialize};

use crate::presentation::{score_color, score_label};

/// Issue reported in every category when the input is too short to score.
pub const NO_CONTENT_ISSUE: &str = "No content to validate";

/// Ceiling of the composite score.
pub const MAX_TOTAL_SCORE: u32 = 100;

/// One of the four independent scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Structure,
    Clarity,
    UserFocus,
    Technical,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Structure,
        Category::Clarity,
        Category::UserFocus,
        Category::Technical,
    ];

    /// Fixed point ceiling for the category. The four ceilings sum to 100.
    pub fn max_score(self) -> u32 {
        match self {
            Category::Structure => 25,
            Category::Clarity => 30,
            Category::UserFocus => 25,
            Category::Technical => 20,
        }
    }

    /// Field name of the category in serialized results.
    pub fn key(self) -> &'static str {
        match self {
            Category::Structure => "structure",
            Category::Clarity => "clarity",
            Category::UserFocus => "user_focus",
            Category::Technical => "technical",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Structure => "Document Structure",
            Category::Clarity => "Requirements Clarity",
            Category::UserFocus => "User Focus",
            Category::Technical => "Technical Quality",
        }
    }
}

/// Score for a single category, with one issue per unmet sub-criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Points earned, always within `0..=max_score`.
    pub score: u32,
    /// Category ceiling.
    pub max_score: u32,
    /// Diagnostics in sub-criterion evaluation order.
    pub issues: Vec<String>,
}

impl CategoryResult {
    /// Clamps `raw` to the category ceiling.
    pub(crate) fn clamped(category: Category, raw: u32, issues: Vec<String>) -> Self {
        let max_score = category.max_score();
        Self {
            score: raw.min(max_score),
            max_score,
            issues,
        }
    }

    pub(crate) fn no_content(category: Category) -> Self {
        Self {
            score: 0,
            max_score: category.max_score(),
            issues: vec![NO_CONTENT_ISSUE.to_string()],
        }
    }
}

/// Composite result of scoring one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Exact sum of the four category scores.
    pub total_score: u32,
    pub structure: CategoryResult,
    pub clarity: CategoryResult,
    pub user_focus: CategoryResult,
    pub technical: CategoryResult,
}

impl ValidationResult {
    pub(crate) fn from_categories(
        structure: CategoryResult,
        clarity: CategoryResult,
        user_focus: CategoryResult,
        technical: CategoryResult,
    ) -> Self {
        let total_score = structure.score + clarity.score + user_focus.score + technical.score;
        Self {
            total_score,
            structure,
            clarity,
            user_focus,
            technical,
        }
    }

    pub(crate) fn no_content() -> Self {
        Self::from_categories(
            CategoryResult::no_content(Category::Structure),
            CategoryResult::no_content(Category::Clarity),
            CategoryResult::no_content(Category::UserFocus),
            CategoryResult::no_content(Category::Technical),
        )
    }

    pub fn max_score(&self) -> u32 {
        MAX_TOTAL_SCORE
    }

    pub fn category(&self, category: Category) -> &CategoryResult {
        match category {
            Category::Structure => &self.structure,
            Category::Clarity => &self.clarity,
            Category::UserFocus => &self.user_focus,
            Category::Technical => &self.technical,
        }
    }

    /// Categories in fixed order: structure, clarity, user focus, technical.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &CategoryResult)> {
        Category::ALL.into_iter().map(move |c| (c, self.category(c)))
    }

    /// All issues across categories, in category order.
    pub fn issues(&self) -> impl Iterator<Item = &str> {
        self.categories()
            .flat_map(|(_, result)| result.issues.iter().map(String::as_str))
    }

    pub fn color(&self) -> &'static str {
        score_color(self.total_score)
    }

    pub fn label(&self) -> &'static str {
        score_label(self.total_score)
    }
}
