use crate::errors::ExtractionError;
use crate::extractor::docx::DocxSource;
use crate::extractor::pdf::PdfSource;
use crate::extractor::r#trait::ExcerptSource;
use crate::extractor::txt::TxtSource;
use crate::models::DocumentKind;
use crate::utils;
use std::path::Path;

/// Factory for creating ExcerptSource instances based on file extension
pub struct SourceFactory;

impl SourceFactory {
    /// Create an ExcerptSource for the file at `path`. Unknown or missing
    /// extensions are an `unsupported_type` failure, not a panic.
    pub fn for_path(path: &Path) -> Result<Box<dyn ExcerptSource>, ExtractionError> {
        let extension = utils::get_extension(path).unwrap_or_default();
        let kind = DocumentKind::from_extension(&extension).ok_or(
            ExtractionError::UnsupportedType {
                extension: extension.clone(),
            },
        )?;

        Ok(match kind {
            DocumentKind::Pdf => Box::new(PdfSource::new(path.to_path_buf())),
            DocumentKind::Docx => Box::new(DocxSource::new(path.to_path_buf())),
            DocumentKind::Txt => Box::new(TxtSource::new(path.to_path_buf())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_factory_txt() {
        let source = SourceFactory::for_path(Path::new("/test/notes.txt")).unwrap();
        assert_eq!(source.kind(), DocumentKind::Txt);
        assert_eq!(source.path(), Path::new("/test/notes.txt"));
    }

    #[test]
    fn test_factory_pdf() {
        let source = SourceFactory::for_path(Path::new("/test/contract.pdf")).unwrap();
        assert_eq!(source.kind(), DocumentKind::Pdf);
    }

    #[test]
    fn test_factory_docx() {
        let source = SourceFactory::for_path(Path::new("/test/letter.docx")).unwrap();
        assert_eq!(source.kind(), DocumentKind::Docx);
    }

    #[test]
    fn test_factory_ignores_extension_case() {
        let source = SourceFactory::for_path(Path::new("/test/REPORT.PDF")).unwrap();
        assert_eq!(source.kind(), DocumentKind::Pdf);
    }

    #[test]
    fn test_factory_unsupported_extension() {
        let err = SourceFactory::for_path(Path::new("/test/notes.xyz")).unwrap_err();
        assert_eq!(err.kind(), "unsupported_type");
        assert!(err.to_string().contains(".xyz"));
    }

    #[test]
    fn test_factory_no_extension() {
        let path = PathBuf::from("/test/README");
        let err = SourceFactory::for_path(&path).unwrap_err();
        assert_eq!(err.kind(), "unsupported_type");
    }
}
