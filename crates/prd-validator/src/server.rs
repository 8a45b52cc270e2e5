use std::sync::Arc;

use futures::future::join_all;
use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use prd_scorer::patterns::REQUIRED_SECTIONS;
use prd_scorer::{Category, MAX_TOTAL_SCORE, score_color, score_label};

use crate::api::{
    CategoryInfo, DescribeScoreParams, DescribeScoreResponse, DocumentFailure,
    RequiredSectionsResponse, SectionInfo, ValidateDirectoryParams, ValidateDirectoryResponse,
    ValidateDocumentParams, ValidateFileParams, ValidationResponse,
};
use crate::documents::{Document, DocumentStore, digest};

#[derive(Clone)]
pub struct PrdValidatorServer {
    documents: Arc<DocumentStore>,
    tool_router: ToolRouter<PrdValidatorServer>,
}

impl PrdValidatorServer {
    pub fn new(documents: DocumentStore) -> Self {
        Self {
            documents: Arc::new(documents),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl PrdValidatorServer {
    #[tool(description = "Score a requirements document (markdown text) from 0 to 100 across structure, clarity, user focus and technical quality.")]
    async fn validate_document(
        &self,
        Parameters(params): Parameters<ValidateDocumentParams>,
    ) -> Result<Json<ValidationResponse>, String> {
        let text = params.text.as_deref();
        let result = prd_scorer::validate_optional_document(text);
        info!(
            bytes = text.map_or(0, str::len),
            total = result.total_score,
            issues = result.issues().count(),
            "validate_document tool invoked"
        );
        Ok(Json(ValidationResponse::new(
            None,
            digest(text.unwrap_or_default()),
            &result,
        )))
    }

    #[tool(description = "Score a requirements document stored under the documents root, by relative path.")]
    async fn validate_file(
        &self,
        Parameters(params): Parameters<ValidateFileParams>,
    ) -> Result<Json<ValidationResponse>, String> {
        let path = params.path.trim().to_string();
        if path.is_empty() {
            return Err("path must not be empty".to_string());
        }

        let document = self.documents.read(&path).await.map_err(|e| {
            warn!(path = %path, error = %e, "validate_file failed");
            e.to_string()
        })?;
        let response = tokio::task::spawn_blocking(move || score_document(document))
            .await
            .map_err(|e| format!("scoring task failed: {e}"))?;
        info!(path = %path, total = response.total_score, "validate_file tool invoked");
        Ok(Json(response))
    }

    #[tool(description = "Score every document with the given extension (default 'md') in a directory under the documents root.")]
    async fn validate_directory(
        &self,
        Parameters(params): Parameters<ValidateDirectoryParams>,
    ) -> Result<Json<ValidateDirectoryResponse>, String> {
        let dir = params.path.unwrap_or_default();
        let extension = params.extension.unwrap_or_else(|| "md".to_string());

        let paths = self
            .documents
            .list(&dir, &extension)
            .await
            .map_err(|e| format!("failed to list '{dir}': {e}"))?;

        let outcomes = join_all(paths.into_iter().map(|path| {
            let documents = Arc::clone(&self.documents);
            async move {
                let document = match documents.read(&path).await {
                    Ok(document) => document,
                    Err(e) => {
                        return Err(DocumentFailure {
                            path,
                            error: e.to_string(),
                        });
                    }
                };
                tokio::task::spawn_blocking(move || score_document(document))
                    .await
                    .map_err(|e| DocumentFailure {
                        path,
                        error: format!("scoring task failed: {e}"),
                    })
            }
        }))
        .await;

        let mut results = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(response) => results.push(response),
                Err(failure) => {
                    warn!(path = %failure.path, error = %failure.error, "document skipped");
                    failures.push(failure);
                }
            }
        }
        info!(
            dir = %dir,
            scored = results.len(),
            failed = failures.len(),
            "validate_directory tool invoked"
        );

        Ok(Json(ValidateDirectoryResponse { results, failures }))
    }

    #[tool(description = "Map a total score (0-100) to its color bucket and readiness label.")]
    async fn describe_score(
        &self,
        Parameters(params): Parameters<DescribeScoreParams>,
    ) -> Result<Json<DescribeScoreResponse>, String> {
        if params.score > MAX_TOTAL_SCORE {
            return Err(format!(
                "score must be between 0 and {MAX_TOTAL_SCORE}, got {}",
                params.score
            ));
        }
        Ok(Json(DescribeScoreResponse {
            score: params.score,
            color: score_color(params.score).to_string(),
            label: score_label(params.score).to_string(),
        }))
    }

    #[tool(description = "List the required document sections with their weights, and the category point ceilings.")]
    async fn list_required_sections(&self) -> Result<Json<RequiredSectionsResponse>, String> {
        let sections = REQUIRED_SECTIONS
            .iter()
            .map(|s| SectionInfo {
                name: s.name.to_string(),
                weight: s.weight,
            })
            .collect();
        let categories = Category::ALL
            .iter()
            .map(|c| CategoryInfo {
                key: c.key().to_string(),
                display_name: c.name().to_string(),
                max_score: c.max_score(),
            })
            .collect();

        Ok(Json(RequiredSectionsResponse {
            sections,
            categories,
            max_total_score: MAX_TOTAL_SCORE,
        }))
    }
}

fn score_document(document: Document) -> ValidationResponse {
    let result = prd_scorer::validate_document(&document.text);
    ValidationResponse::new(Some(document.path), digest(&document.text), &result)
}

#[tool_handler]
impl ServerHandler for PrdValidatorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "prd-validator".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "PRD validator MCP server. Scores product requirements documents with \
                 deterministic rules. Use validate_document for inline markdown, validate_file \
                 or validate_directory for documents under the configured root, describe_score \
                 to map a total to its color and label, and list_required_sections to see the \
                 expected headings."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const DOCUMENT: &str = "\
# Search PRD
## Purpose
Help agents find tickets.
## User Personas
Support agents.
## Features
As a user, I want to search so that I answer faster.
";

    fn server(root: Option<&std::path::Path>) -> PrdValidatorServer {
        let config = Config {
            documents_path: root.map(|p| p.to_string_lossy().to_string()),
            max_document_bytes: 1024 * 1024,
        };
        PrdValidatorServer::new(DocumentStore::new(&config).unwrap())
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = PrdValidatorServer::tool_router().list_all();
        for name in [
            "validate_document",
            "validate_file",
            "validate_directory",
            "describe_score",
            "list_required_sections",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[tokio::test]
    async fn validate_document_matches_library() {
        let Json(response) = server(None)
            .validate_document(Parameters(ValidateDocumentParams {
                text: Some(DOCUMENT.to_string()),
            }))
            .await
            .unwrap();
        let expected = prd_scorer::validate_document(DOCUMENT);
        assert_eq!(response.total_score, expected.total_score);
        assert_eq!(response.structure.issues, expected.structure.issues);
        assert_eq!(response.color, expected.color());
        assert_eq!(response.digest, digest(DOCUMENT));
        assert!(response.path.is_none());
    }

    #[tokio::test]
    async fn missing_text_scores_zero() {
        let Json(response) = server(None)
            .validate_document(Parameters(ValidateDocumentParams { text: None }))
            .await
            .unwrap();
        assert_eq!(response.total_score, 0);
        assert_eq!(response.label, "Incomplete");
        assert_eq!(response.clarity.issues, [prd_scorer::NO_CONTENT_ISSUE]);
    }

    #[tokio::test]
    async fn file_tools_require_a_root() {
        let result = server(None)
            .validate_file(Parameters(ValidateFileParams {
                path: "a.md".to_string(),
            }))
            .await;
        let Err(err) = result else {
            panic!("validate_file should fail without a documents root");
        };
        assert!(err.contains("PRD_DOCUMENTS_PATH"), "{err}");
    }

    #[tokio::test]
    async fn validate_file_matches_library() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("specs")).unwrap();
        std::fs::write(dir.path().join("specs/search.md"), DOCUMENT).unwrap();

        let Json(response) = server(Some(dir.path()))
            .validate_file(Parameters(ValidateFileParams {
                path: " specs/search.md ".to_string(),
            }))
            .await
            .unwrap();
        let expected = prd_scorer::validate_document(DOCUMENT);
        assert_eq!(response.path.as_deref(), Some("specs/search.md"));
        assert_eq!(response.total_score, expected.total_score);
        assert_eq!(response.clarity.issues, expected.clarity.issues);
        assert_eq!(response.digest, digest(DOCUMENT));
    }

    #[tokio::test]
    async fn validate_directory_scores_each_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.md"), DOCUMENT).unwrap();
        std::fs::write(dir.path().join("a.md"), "short").unwrap();
        std::fs::write(dir.path().join("skip.txt"), DOCUMENT).unwrap();

        let Json(response) = server(Some(dir.path()))
            .validate_directory(Parameters(ValidateDirectoryParams {
                path: None,
                extension: None,
            }))
            .await
            .unwrap();

        let paths: Vec<&str> = response
            .results
            .iter()
            .filter_map(|r| r.path.as_deref())
            .collect();
        assert_eq!(paths, ["a.md", "b.md"]);
        assert_eq!(response.results[0].total_score, 0);
        assert_eq!(
            response.results[1].total_score,
            prd_scorer::validate_document(DOCUMENT).total_score
        );
        assert!(response.failures.is_empty());
    }

    #[tokio::test]
    async fn describe_score_uses_both_tables() {
        let server = server(None);
        let Json(at_80) = server
            .describe_score(Parameters(DescribeScoreParams { score: 80 }))
            .await
            .unwrap();
        assert_eq!((at_80.color.as_str(), at_80.label.as_str()), ("green", "Excellent"));

        let Json(at_69) = server
            .describe_score(Parameters(DescribeScoreParams { score: 69 }))
            .await
            .unwrap();
        assert_eq!((at_69.color.as_str(), at_69.label.as_str()), ("yellow", "Needs Work"));

        assert!(server
            .describe_score(Parameters(DescribeScoreParams { score: 101 }))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn lists_sections_and_ceilings() {
        let Json(response) = server(None).list_required_sections().await.unwrap();
        assert_eq!(response.sections.len(), 8);
        assert_eq!(response.sections[0].name, "Purpose/Introduction");
        assert_eq!(
            response.categories.iter().map(|c| c.max_score).sum::<u32>(),
            response.max_total_score
        );
    }
}
