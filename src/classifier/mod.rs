pub mod ollama;
pub mod openai;
pub mod prompt;
pub mod r#trait;

pub use ollama::OllamaChat;
pub use openai::OpenAiChat;
pub use r#trait::ChatModel;

use crate::config::ProviderConfig;
use crate::constants::CATEGORY_OPTIONS;
use crate::errors::ClassificationError;
use crate::models::{Classification, Excerpt};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Asks the model for a name and category, then validates the reply.
///
/// No retry: one failed attempt comes back as a typed failure and the
/// caller decides on retry policy.
pub struct Classifier {
    model: Arc<dyn ChatModel>,
    categories: Vec<String>,
}

impl Classifier {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self::with_categories(
            model,
            CATEGORY_OPTIONS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn with_categories(model: Arc<dyn ChatModel>, categories: Vec<String>) -> Self {
        Self { model, categories }
    }

    /// Build the provider named in the configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let model: Arc<dyn ChatModel> = match config.kind.as_str() {
            "ollama" => Arc::new(OllamaChat::new(
                &config.url,
                &config.model,
                config.temperature,
                timeout,
            )?),
            "openai" => {
                let api_key = config.api_key().context(
                    "No API key configured; set OPENAI_API_KEY or provider.api_key",
                )?;
                Arc::new(OpenAiChat::new(
                    &config.url,
                    &api_key,
                    &config.model,
                    config.temperature,
                    timeout,
                )?)
            }
            other => anyhow::bail!("Unknown provider kind: {}", other),
        };

        Ok(Self::new(model))
    }

    /// Classify an excerpt into a new filename and category folder.
    pub async fn classify(
        &self,
        excerpt: &Excerpt,
    ) -> Result<Classification, ClassificationError> {
        let prompt = prompt::build_prompt(excerpt, &self.categories);

        let raw = self.model.complete(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "model request failed");
            ClassificationError::Api(e.to_string())
        })?;

        let body = strip_code_fence(&raw);
        let parsed: Classification = serde_json::from_str(body).map_err(|_| {
            tracing::error!("failed to parse model reply as JSON");
            tracing::debug!(raw = %raw, "raw model output");
            ClassificationError::Parse { raw: raw.clone() }
        })?;

        self.validate(parsed, &raw)
    }

    fn validate(
        &self,
        classification: Classification,
        raw: &str,
    ) -> Result<Classification, ClassificationError> {
        let reject = |reason: String| {
            tracing::error!(reason = %reason, "model reply violated the output contract");
            tracing::debug!(raw = %raw, "raw model output");
            Err(ClassificationError::InvalidOutput {
                reason,
                raw: raw.to_string(),
            })
        };

        if !self
            .categories
            .iter()
            .any(|category| category == &classification.category)
        {
            return reject(format!("unknown category: {:?}", classification.category));
        }

        let name = classification.new_filename.as_str();
        if name.trim().is_empty() {
            return reject("empty filename".to_string());
        }
        if name.contains(['/', '\\', '\0']) {
            return reject(format!("filename contains path characters: {:?}", name));
        }
        if name == "." || name == ".." {
            return reject(format!("filename is a directory reference: {:?}", name));
        }

        Ok(classification)
    }
}

/// Strip an optional markdown code fence around the model's JSON reply.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
