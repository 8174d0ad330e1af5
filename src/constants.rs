/// Constants used throughout docshelf

/// Folder categories the model may choose from. Anything outside this list
/// is rejected as an output-contract violation rather than created on disk.
pub const CATEGORY_OPTIONS: &[&str] = &[
    "Contracts",
    "Legal",
    "HR",
    "Finance",
    "Client_Communications",
    "Misc",
];

/// File extensions (lowercase, without the dot) the intake accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Hard cap on excerpt length in characters, after newline normalization.
/// Bounds the prompt even for documents with pathological first pages.
pub const EXCERPT_MAX_CHARS: usize = 2000;

/// Number of leading PDF pages read for the excerpt.
pub const PDF_EXCERPT_PAGES: usize = 2;

/// Number of leading paragraphs read from a .docx for the excerpt.
pub const DOCX_EXCERPT_PARAGRAPHS: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_options_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for category in CATEGORY_OPTIONS {
            assert!(seen.insert(category), "duplicate category: {}", category);
        }
    }

    #[test]
    fn test_supported_extensions_are_lowercase() {
        for ext in SUPPORTED_EXTENSIONS {
            assert_eq!(*ext, ext.to_lowercase());
            assert!(!ext.starts_with('.'));
        }
    }
}
