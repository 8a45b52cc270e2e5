use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use prd_scorer::{CategoryResult, ValidationResult};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateDocumentParams {
    /// Full document text in markdown (headings with '#', bullets with '-').
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateFileParams {
    /// Path relative to the documents root, e.g. "specs/search.md".
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValidateDirectoryParams {
    /// Directory relative to the documents root (default: the root itself).
    pub path: Option<String>,
    /// File extension to score (default: "md").
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DescribeScoreParams {
    /// Total score between 0 and 100.
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryScore {
    pub score: u32,
    pub max_score: u32,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResponse {
    /// Path relative to the documents root, for file-based tools.
    pub path: Option<String>,
    /// Hex SHA-256 of the scored text.
    pub digest: String,
    pub total_score: u32,
    pub max_score: u32,
    pub color: String,
    pub label: String,
    pub structure: CategoryScore,
    pub clarity: CategoryScore,
    pub user_focus: CategoryScore,
    pub technical: CategoryScore,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentFailure {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ValidateDirectoryResponse {
    pub results: Vec<ValidationResponse>,
    /// Files that could not be read; they do not affect the other results.
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DescribeScoreResponse {
    pub score: u32,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SectionInfo {
    pub name: String,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: String,
    pub display_name: String,
    pub max_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RequiredSectionsResponse {
    pub sections: Vec<SectionInfo>,
    pub categories: Vec<CategoryInfo>,
    pub max_total_score: u32,
}

impl From<&CategoryResult> for CategoryScore {
    fn from(result: &CategoryResult) -> Self {
        Self {
            score: result.score,
            max_score: result.max_score,
            issues: result.issues.clone(),
        }
    }
}

impl ValidationResponse {
    pub fn new(path: Option<String>, digest: String, result: &ValidationResult) -> Self {
        Self {
            path,
            digest,
            total_score: result.total_score,
            max_score: result.max_score(),
            color: result.color().to_string(),
            label: result.label().to_string(),
            structure: CategoryScore::from(&result.structure),
            clarity: CategoryScore::from(&result.clarity),
            user_focus: CategoryScore::from(&result.user_focus),
            technical: CategoryScore::from(&result.technical),
        }
    }
}
