use crate::constants::PDF_EXCERPT_PAGES;
use crate::errors::ExtractionError;
use crate::extractor::r#trait::ExcerptSource;
use crate::models::DocumentKind;
use std::path::{Path, PathBuf};

/// PDF source. Reads the text of only the first two pages via lopdf, with
/// pdf-extract as a fallback for documents lopdf yields no text from.
#[derive(Debug)]
pub struct PdfSource {
    path: PathBuf,
}

impl PdfSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_leading_pages(path: &Path) -> Result<String, ExtractionError> {
        use lopdf::Document;

        let doc = Document::load(path).map_err(|e| ExtractionError::Read {
            path: path.to_path_buf(),
            reason: format!("failed to load PDF: {}", e),
        })?;

        let mut text = String::new();
        // get_pages is a BTreeMap, so keys iterate in page order
        for page_num in doc.get_pages().keys().take(PDF_EXCERPT_PAGES) {
            if let Ok(page_text) = doc.extract_text(&[*page_num]) {
                text.push_str(&page_text);
                text.push('\n');
            }
        }

        if text.trim().is_empty() {
            // Some PDFs encode text in ways lopdf does not decode
            match pdf_extract::extract_text(path) {
                Ok(fallback) => Ok(fallback),
                Err(e) => Err(ExtractionError::Read {
                    path: path.to_path_buf(),
                    reason: format!("no text extracted: {}", e),
                }),
            }
        } else {
            Ok(text)
        }
    }
}

#[async_trait::async_trait]
impl ExcerptSource for PdfSource {
    async fn read_excerpt(&self) -> Result<String, ExtractionError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_leading_pages(&path))
            .await
            .map_err(|e| ExtractionError::Read {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
