use crate::models::Excerpt;

/// Build the classification prompt. Deterministic: the same excerpt and
/// category list always produce the same prompt text.
pub fn build_prompt(excerpt: &Excerpt, categories: &[String]) -> String {
    let file_type = excerpt.kind.extension();
    format!(
        r#"## You are a file organization assistant helping legal and business professionals name and categorize documents.

## Your task is:
1. Analyze the content of the document.
2. Generate a meaningful, standardized file name using the following rules:
   - Format: "Date - Category - ShortDescription.{file_type}"
   - Use 4-8 concise words for ShortDescription
   - If ClientName or Date not available, omit
3. Choose the best-fit folder category from:
   - {categories}

Here is the document text:
"""{text}"""

Respond only with JSON:
{{
  "new_filename": "Date - Category - ShortDescription.{file_type}",
  "category_folder": "Contracts"
}}
"#,
        file_type = file_type,
        categories = categories.join(", "),
        text = excerpt.text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CATEGORY_OPTIONS;
    use crate::models::DocumentKind;

    fn categories() -> Vec<String> {
        CATEGORY_OPTIONS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_embeds_excerpt_verbatim() {
        let excerpt = Excerpt::new("Invoice #4 for ClientX", DocumentKind::Txt);
        let prompt = build_prompt(&excerpt, &categories());
        assert!(prompt.contains(r#""""Invoice #4 for ClientX""""#));
    }

    #[test]
    fn test_prompt_fixes_output_extension() {
        let excerpt = Excerpt::new("Employment agreement", DocumentKind::Docx);
        let prompt = build_prompt(&excerpt, &categories());
        assert!(prompt.contains("ShortDescription.docx"));
        assert!(!prompt.contains("ShortDescription.pdf"));
    }

    #[test]
    fn test_prompt_lists_all_categories() {
        let excerpt = Excerpt::new("text", DocumentKind::Pdf);
        let prompt = build_prompt(&excerpt, &categories());
        for category in CATEGORY_OPTIONS {
            assert!(prompt.contains(category), "missing category: {}", category);
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let excerpt = Excerpt::new("Quarterly report", DocumentKind::Pdf);
        assert_eq!(
            build_prompt(&excerpt, &categories()),
            build_prompt(&excerpt, &categories())
        );
    }
}
