use crate::constants::DOCX_EXCERPT_PARAGRAPHS;
use crate::errors::ExtractionError;
use crate::extractor::r#trait::ExcerptSource;
use crate::models::DocumentKind;
use std::path::{Path, PathBuf};

/// Word-processor source. Reads only the first five paragraphs.
#[derive(Debug)]
pub struct DocxSource {
    path: PathBuf,
}

impl DocxSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_leading_paragraphs(path: &Path) -> Result<String, ExtractionError> {
        let data = std::fs::read(path).map_err(|e| ExtractionError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let doc = docx_rs::read_docx(&data).map_err(|e| ExtractionError::Read {
            path: path.to_path_buf(),
            reason: format!("failed to parse docx: {}", e),
        })?;

        let mut paragraphs = Vec::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                let mut line = String::new();
                for child in paragraph.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(text) = child {
                                line.push_str(&text.text);
                            }
                        }
                    }
                }
                paragraphs.push(line);
                if paragraphs.len() == DOCX_EXCERPT_PARAGRAPHS {
                    break;
                }
            }
        }

        Ok(paragraphs.join(" "))
    }
}

#[async_trait::async_trait]
impl ExcerptSource for DocxSource {
    async fn read_excerpt(&self) -> Result<String, ExtractionError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_leading_paragraphs(&path))
            .await
            .map_err(|e| ExtractionError::Read {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
