use crate::classifier::Classifier;
use crate::config::Config;
use crate::errors::PipelineError;
use crate::extractor;
use crate::models::Placement;
use crate::placer::Placer;
use anyhow::Result;
use std::path::Path;

/// Sequences extraction, classification, and placement for one document.
///
/// Each call is one independent unit of work; the pipeline holds no mutable
/// state, so it is safe to share behind an `Arc` across concurrent uploads.
/// Any stage failure short-circuits the rest and is returned typed — the
/// pipeline never retries and never panics past this boundary.
pub struct Pipeline {
    classifier: Classifier,
    placer: Placer,
}

impl Pipeline {
    pub fn new(classifier: Classifier, placer: Placer) -> Self {
        Self { classifier, placer }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let classifier = Classifier::from_config(&config.provider)?;
        let placer = Placer::new(config.storage.organized_root(), config.storage.overwrite);
        Ok(Self::new(classifier, placer))
    }

    /// Run the full pipeline on the file at `path`, moving it into its
    /// category folder on success.
    pub async fn process(&self, path: &Path) -> Result<Placement, PipelineError> {
        let name = display_name(path);
        tracing::info!(file = %name, "extracting");
        let excerpt = match extractor::extract(path).await {
            Ok(excerpt) => excerpt,
            Err(e) => return Err(self.fail(&name, e.into())),
        };

        tracing::info!(file = %name, "classifying");
        let classification = match self.classifier.classify(&excerpt).await {
            Ok(classification) => classification,
            Err(e) => return Err(self.fail(&name, e.into())),
        };

        tracing::info!(file = %name, category = %classification.category, "placing");
        let placement = match self.placer.place(path, &classification).await {
            Ok(placement) => placement,
            Err(e) => return Err(self.fail(&name, e.into())),
        };

        tracing::info!(
            file = %name,
            destination = %placement.destination.display(),
            "done"
        );
        Ok(placement)
    }

    /// Classify without moving: returns the destination the file would be
    /// shelved at. Used for dry-run previews.
    pub async fn plan(&self, path: &Path) -> Result<Placement, PipelineError> {
        let excerpt = extractor::extract(path).await?;
        let classification = self.classifier.classify(&excerpt).await?;
        Ok(Placement {
            destination: self.placer.destination_for(&classification),
        })
    }

    fn fail(&self, name: &str, error: PipelineError) -> PipelineError {
        tracing::error!(
            file = %name,
            stage = error.stage().as_str(),
            kind = error.kind(),
            error = %error,
            "stage failed"
        );
        error
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unnamed>")
        .to_string()
}
