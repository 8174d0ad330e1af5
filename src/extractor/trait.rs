use crate::errors::ExtractionError;
use crate::models::DocumentKind;
use std::path::Path;

/// A document that can yield the bounded leading text used for classification
#[async_trait::async_trait]
pub trait ExcerptSource: Send + Sync + std::fmt::Debug {
    /// Read the raw leading text of the document. Not yet normalized;
    /// the caller collapses line breaks and caps the length.
    async fn read_excerpt(&self) -> Result<String, ExtractionError>;

    /// The declared file type of this source
    fn kind(&self) -> DocumentKind;

    /// Path of the underlying file
    fn path(&self) -> &Path;
}
