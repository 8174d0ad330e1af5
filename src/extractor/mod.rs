pub mod docx;
pub mod factory;
pub mod pdf;
pub mod r#trait;
pub mod txt;

pub use factory::SourceFactory;
pub use r#trait::ExcerptSource;

use crate::errors::ExtractionError;
use crate::models::Excerpt;
use std::path::Path;

/// Extract a bounded, single-line excerpt from the document at `path`.
///
/// Dispatches on the file extension; unsupported extensions, unreadable
/// files, and documents with no extractable text all come back as typed
/// failures rather than panics.
pub async fn extract(path: &Path) -> Result<Excerpt, ExtractionError> {
    match extract_inner(path).await {
        Ok(excerpt) => Ok(excerpt),
        Err(e) => {
            tracing::error!(file = %path.display(), error = %e, "text extraction failed");
            Err(e)
        }
    }
}

async fn extract_inner(path: &Path) -> Result<Excerpt, ExtractionError> {
    let source = SourceFactory::for_path(path)?;
    let raw = source.read_excerpt().await?;
    let excerpt = Excerpt::new(&raw, source.kind());

    // An excerpt is never empty on success; absence of text is a failure
    if excerpt.is_empty() {
        return Err(ExtractionError::Read {
            path: path.to_path_buf(),
            reason: "no text content".to_string(),
        });
    }

    Ok(excerpt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentKind;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_extract_txt_is_single_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");
        fs::write(&path, "Invoice #4 for ClientX\n\nBody...").unwrap();

        let excerpt = extract(&path).await.unwrap();
        assert_eq!(excerpt.text, "Invoice #4 for ClientX");
        assert_eq!(excerpt.kind, DocumentKind::Txt);
        assert!(!excerpt.text.contains('\n'));
    }

    #[tokio::test]
    async fn test_extract_collapses_line_breaks() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("letter.txt");
        fs::write(&path, "Dear Sir,\nplease find attached\nthe signed contract").unwrap();

        let excerpt = extract(&path).await.unwrap();
        assert_eq!(
            excerpt.text,
            "Dear Sir, please find attached the signed contract"
        );
    }

    #[tokio::test]
    async fn test_extract_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.xyz");
        fs::write(&path, "content").unwrap();

        let err = extract(&path).await.unwrap_err();
        assert_eq!(err.kind(), "unsupported_type");
    }

    #[tokio::test]
    async fn test_extract_does_not_consume_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("kept.txt");
        fs::write(&path, "Some content").unwrap();

        extract(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "Some content");
    }

    #[tokio::test]
    async fn test_extract_empty_file_is_read_failure() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "   \n\n  ").unwrap();

        let err = extract(&path).await.unwrap_err();
        assert_eq!(err.kind(), "read_failed");
    }
}
