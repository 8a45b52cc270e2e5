//! Rule-based quality scoring for product requirements documents.
//!
//! [`validate_document`] scores markdown-like text across four categories
//! (structure, clarity, user focus, technical quality) into a 0-100 total.
//! Every function here is pure; results can be computed concurrently
//! without coordination.

pub mod clarity;
pub mod model;
pub mod patterns;
pub mod presentation;
pub mod structure;
pub mod technical;
pub mod user_focus;
pub mod validate;

pub use clarity::score_requirements_clarity;
pub use model::{Category, CategoryResult, ValidationResult, MAX_TOTAL_SCORE, NO_CONTENT_ISSUE};
pub use presentation::{score_color, score_label};
pub use structure::score_document_structure;
pub use technical::score_technical_quality;
pub use user_focus::score_user_focus;
pub use validate::{validate_document, validate_optional_document, MIN_CONTENT_CHARS};
