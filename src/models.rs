use crate::constants::EXCERPT_MAX_CHARS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// File types the intake pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    /// Map a lowercase-insensitive extension (without the dot) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Canonical extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A document sitting in the inbox, identified at intake time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceDocument {
    /// Full path to the stored upload
    pub path: PathBuf,
    /// Declared file type, inferred from the extension
    pub kind: DocumentKind,
    /// File size in bytes
    pub size: u64,
    /// Blake3 hash of file contents
    pub fingerprint: String,
}

impl SourceDocument {
    pub fn new(path: PathBuf, kind: DocumentKind, size: u64, fingerprint: String) -> Self {
        Self {
            path,
            kind,
            size,
            fingerprint,
        }
    }

    /// Identify a stored upload: kind from the extension, size and content
    /// hash from disk.
    pub fn probe(path: &std::path::Path) -> anyhow::Result<Self> {
        let extension = crate::utils::get_extension(path).unwrap_or_default();
        let kind = DocumentKind::from_extension(&extension)
            .ok_or_else(|| anyhow::anyhow!("unsupported extension: {:?}", extension))?;
        let size = std::fs::metadata(path)?.len();
        let fingerprint = crate::utils::file_fingerprint(path)?;
        Ok(Self::new(path.to_path_buf(), kind, size, fingerprint))
    }
}

/// Bounded leading text of a document, used as classification input.
///
/// Always single-line: the constructor collapses internal line breaks to
/// spaces, trims, and caps the length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    pub kind: DocumentKind,
}

impl Excerpt {
    pub fn new(raw: &str, kind: DocumentKind) -> Self {
        let mut text: String = raw
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ")
            .trim()
            .to_string();

        if text.chars().count() > EXCERPT_MAX_CHARS {
            text = text.chars().take(EXCERPT_MAX_CHARS).collect();
        }

        Self { text, kind }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Validated model output: a new name for the file and the category folder
/// it belongs in. Only constructed from replies that pass validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Classification {
    pub new_filename: String,
    #[serde(rename = "category_folder")]
    pub category: String,
}

/// Where a file ended up after a successful move.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub destination: PathBuf,
}

/// One step of the pipeline, used in logs and failure envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extraction,
    Classification,
    Placement,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extraction => "extraction",
            Self::Classification => "classification",
            Self::Placement => "placement",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_from_extension() {
        assert_eq!(DocumentKind::from_extension("pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("PDF"), Some(DocumentKind::Pdf));
        assert_eq!(
            DocumentKind::from_extension("docx"),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::from_extension("txt"), Some(DocumentKind::Txt));
        assert_eq!(DocumentKind::from_extension("xyz"), None);
        assert_eq!(DocumentKind::from_extension(""), None);
    }

    #[test]
    fn test_document_kind_extension_round_trip() {
        for kind in [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Txt] {
            assert_eq!(DocumentKind::from_extension(kind.extension()), Some(kind));
        }
    }

    #[test]
    fn test_source_document_probe() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("report.txt");
        std::fs::write(&path, "content").unwrap();

        let doc = SourceDocument::probe(&path).unwrap();
        assert_eq!(doc.kind, DocumentKind::Txt);
        assert_eq!(doc.size, 7);
        assert_eq!(doc.fingerprint.len(), 64);
        assert_eq!(doc.path, path);
    }

    #[test]
    fn test_source_document_probe_rejects_unsupported() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.xyz");
        std::fs::write(&path, "content").unwrap();

        assert!(SourceDocument::probe(&path).is_err());
    }

    #[test]
    fn test_excerpt_is_single_line() {
        let excerpt = Excerpt::new("Invoice #4\nfor ClientX\r\nBody", DocumentKind::Txt);
        assert!(!excerpt.text.contains('\n'));
        assert!(!excerpt.text.contains('\r'));
        assert_eq!(excerpt.text, "Invoice #4 for ClientX Body");
    }

    #[test]
    fn test_excerpt_is_trimmed() {
        let excerpt = Excerpt::new("  \n  hello world \n ", DocumentKind::Pdf);
        assert_eq!(excerpt.text, "hello world");
        assert_eq!(excerpt.kind, DocumentKind::Pdf);
    }

    #[test]
    fn test_excerpt_is_capped() {
        let long = "a".repeat(EXCERPT_MAX_CHARS * 2);
        let excerpt = Excerpt::new(&long, DocumentKind::Txt);
        assert_eq!(excerpt.text.chars().count(), EXCERPT_MAX_CHARS);
    }

    #[test]
    fn test_excerpt_empty_after_normalization() {
        let excerpt = Excerpt::new(" \n\r\n ", DocumentKind::Txt);
        assert!(excerpt.is_empty());
    }

    #[test]
    fn test_classification_deserializes_wire_keys() {
        let parsed: Classification = serde_json::from_str(
            r#"{"new_filename": "2024-01-01 - Finance - Invoice for ClientX.txt", "category_folder": "Finance"}"#,
        )
        .unwrap();
        assert_eq!(parsed.category, "Finance");
        assert_eq!(
            parsed.new_filename,
            "2024-01-01 - Finance - Invoice for ClientX.txt"
        );
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Extraction.as_str(), "extraction");
        assert_eq!(Stage::Classification.as_str(), "classification");
        assert_eq!(Stage::Placement.as_str(), "placement");
    }
}
