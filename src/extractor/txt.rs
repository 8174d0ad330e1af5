use crate::errors::ExtractionError;
use crate::extractor::r#trait::ExcerptSource;
use crate::models::DocumentKind;
use std::path::{Path, PathBuf};

/// Plain-text source. Reads only the content up to the first
/// blank-line-separated block.
#[derive(Debug)]
pub struct TxtSource {
    path: PathBuf,
}

impl TxtSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl ExcerptSource for TxtSource {
    async fn read_excerpt(&self) -> Result<String, ExtractionError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ExtractionError::Read {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        let content = content.replace("\r\n", "\n");
        let block = content.split("\n\n").next().unwrap_or("");
        Ok(block.to_string())
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Txt
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
