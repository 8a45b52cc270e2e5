//! Read-only access to documents under the configured root directory.
//!
//! Paths from tool calls are resolved relative to the root and canonicalized,
//! so `..` segments and symlinks cannot reach files outside it.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::config::Config;
use crate::error::AppError;

/// A document loaded from disk.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path relative to the documents root, with `/` separators.
    pub path: String,
    pub text: String,
}

pub struct DocumentStore {
    root: Option<PathBuf>,
    max_bytes: u64,
}

impl DocumentStore {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let root = config
            .documents_path()
            .map(|path| path.canonicalize())
            .transpose()?;
        Ok(Self {
            root,
            max_bytes: config.max_document_bytes,
        })
    }

    fn root(&self) -> Result<&Path, AppError> {
        self.root.as_deref().ok_or_else(|| {
            AppError::Config(
                "file tools are disabled: set PRD_DOCUMENTS_PATH to a directory".to_string(),
            )
        })
    }

    /// Resolves `relative` inside the root. An empty path is the root itself.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, AppError> {
        let root = self.root()?;
        let candidate = root.join(relative.trim());
        let resolved = candidate.canonicalize().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(relative.to_string()),
            _ => AppError::Io(e),
        })?;
        if !resolved.starts_with(root) {
            return Err(AppError::OutsideRoot(relative.to_string()));
        }
        Ok(resolved)
    }

    pub async fn read(&self, relative: &str) -> Result<Document, AppError> {
        let path = self.resolve(relative)?;
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(AppError::NotFound(relative.to_string()));
        }
        if metadata.len() > self.max_bytes {
            return Err(AppError::TooLarge {
                path: relative.to_string(),
                size: metadata.len(),
                limit: self.max_bytes,
            });
        }

        // The file may have grown since the metadata check.
        let file = tokio::fs::File::open(&path).await?;
        let Some(bytes) = read_capped(file, self.max_bytes).await? else {
            return Err(AppError::TooLarge {
                path: relative.to_string(),
                size: self.max_bytes + 1,
                limit: self.max_bytes,
            });
        };
        let text = String::from_utf8(bytes).map_err(|e| AppError::InvalidDocument {
            path: relative.to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), bytes = text.len(), "document loaded");

        Ok(Document {
            path: self.relative_display(&path)?,
            text,
        })
    }

    /// Files directly under `relative` whose extension matches, sorted by path.
    pub async fn list(&self, relative: &str, extension: &str) -> Result<Vec<String>, AppError> {
        let dir = self.resolve(relative)?;
        let extension = extension.trim_start_matches('.');

        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
            if matches && entry.file_type().await?.is_file() {
                paths.push(self.relative_display(&path)?);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn relative_display(&self, path: &Path) -> Result<String, AppError> {
        let root = self.root()?;
        let relative = path
            .strip_prefix(root)
            .map_err(|_| AppError::OutsideRoot(path.display().to_string()))?;
        Ok(relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"))
    }
}

/// Reads at most `limit` bytes. Returns `None` when the reader has more.
async fn read_capped<R>(reader: R, limit: u64) -> std::io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut bytes).await?;
    if bytes.len() as u64 > limit {
        return Ok(None);
    }
    Ok(Some(bytes))
}

/// Hex SHA-256 of the document text, letting callers correlate results
/// without echoing the document back.
pub fn digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(root: &Path, max_bytes: u64) -> DocumentStore {
        let config = Config {
            documents_path: Some(root.to_string_lossy().to_string()),
            max_document_bytes: max_bytes,
        };
        DocumentStore::new(&config).unwrap()
    }

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[tokio::test]
    async fn reads_nested_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("specs")).unwrap();
        std::fs::write(dir.path().join("specs/search.md"), "# Search").unwrap();

        let doc = store(dir.path(), 1024).read("specs/search.md").await.unwrap();
        assert_eq!(doc.path, "specs/search.md");
        assert_eq!(doc.text, "# Search");
    }

    #[tokio::test]
    async fn rejects_escape_and_missing_and_oversized() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("docs");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(parent.path().join("secret.md"), "secret").unwrap();
        std::fs::write(root.join("big.md"), "x".repeat(64)).unwrap();

        let store = store(&root, 16);
        assert!(matches!(
            store.read("../secret.md").await,
            Err(AppError::OutsideRoot(_))
        ));
        assert!(matches!(
            store.read("nope.md").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.read("big.md").await,
            Err(AppError::TooLarge { size: 64, limit: 16, .. })
        ));
        assert!(matches!(store.read("").await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn capped_read_stops_past_the_limit() {
        let within = read_capped(&b"12345678"[..], 8).await.unwrap();
        assert_eq!(within.as_deref(), Some(&b"12345678"[..]));
        assert_eq!(read_capped(&b"123456789"[..], 8).await.unwrap(), None);
        assert_eq!(read_capped(&b""[..], 0).await.unwrap(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn reads_document_exactly_at_limit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("edge.md"), "x".repeat(16)).unwrap();
        let doc = store(dir.path(), 16).read("edge.md").await.unwrap();
        assert_eq!(doc.text.len(), 16);
    }

    #[tokio::test]
    async fn rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bin.md"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            store(dir.path(), 1024).read("bin.md").await,
            Err(AppError::InvalidDocument { .. })
        ));
    }

    #[tokio::test]
    async fn lists_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.md", "a.MD", "notes.txt"] {
            std::fs::write(dir.path().join(name), "text").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.md")).unwrap();

        let listed = store(dir.path(), 1024).list("", ".md").await.unwrap();
        assert_eq!(listed, ["a.MD", "b.md"]);
    }

    #[tokio::test]
    async fn disabled_without_root() {
        let config = Config {
            documents_path: None,
            max_document_bytes: 1024,
        };
        let store = DocumentStore::new(&config).unwrap();
        assert!(matches!(store.read("a.md").await, Err(AppError::Config(_))));
    }
}
