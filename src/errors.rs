use crate::models::Stage;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading an excerpt from an uploaded document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file type: .{extension}")]
    UnsupportedType { extension: String },

    #[error("failed to read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },
}

impl ExtractionError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "unsupported_type",
            Self::Read { .. } => "read_failed",
        }
    }
}

/// Failures while asking the model for a name and category.
///
/// Transport faults and unparseable replies are kept apart because they have
/// different operator remedies: the first points at the provider or network,
/// the second at a prompt/model regression. For the latter two variants the
/// raw reply is retained for diagnosis.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("model request failed: {0}")]
    Api(String),

    #[error("failed to parse model reply as JSON")]
    Parse { raw: String },

    #[error("model reply violated the output contract: {reason}")]
    InvalidOutput { reason: String, raw: String },
}

impl ClassificationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Api(_) => "gpt_api_error",
            Self::Parse { .. } => "json_parse_error",
            Self::InvalidOutput { .. } => "invalid_model_output",
        }
    }

    /// Raw provider output, when the call itself succeeded.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            Self::Api(_) => None,
            Self::Parse { raw } | Self::InvalidOutput { raw, .. } => Some(raw),
        }
    }
}

/// Failures while moving a classified file into its category folder.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("destination already exists: {}", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("failed to move {}: {reason}", .from.display())]
    Move { from: PathBuf, reason: String },
}

impl PlacementError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DestinationExists { .. } => "destination_exists",
            Self::Move { .. } => "move_failed",
        }
    }
}

/// A stage failure surfaced by the pipeline. Terminal: the orchestrator
/// never retries, and later stages are never reached.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

impl PipelineError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Extraction(_) => Stage::Extraction,
            Self::Classification(_) => Stage::Classification,
            Self::Placement(_) => Stage::Placement,
        }
    }

    /// Machine-readable failure kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Extraction(e) => e.kind(),
            Self::Classification(e) => e.kind(),
            Self::Placement(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_kinds() {
        let err = ExtractionError::UnsupportedType {
            extension: "xyz".to_string(),
        };
        assert_eq!(err.kind(), "unsupported_type");
        assert!(err.to_string().contains(".xyz"));

        let err = ExtractionError::Read {
            path: PathBuf::from("/tmp/a.txt"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.kind(), "read_failed");
    }

    #[test]
    fn test_classification_error_raw_output() {
        let err = ClassificationError::Api("connection refused".to_string());
        assert_eq!(err.kind(), "gpt_api_error");
        assert!(err.raw_output().is_none());

        let err = ClassificationError::Parse {
            raw: "not json".to_string(),
        };
        assert_eq!(err.kind(), "json_parse_error");
        assert_eq!(err.raw_output(), Some("not json"));

        let err = ClassificationError::InvalidOutput {
            reason: "unknown category".to_string(),
            raw: "{}".to_string(),
        };
        assert_eq!(err.kind(), "invalid_model_output");
        assert_eq!(err.raw_output(), Some("{}"));
    }

    #[test]
    fn test_pipeline_error_stage_and_kind() {
        let err = PipelineError::from(ExtractionError::UnsupportedType {
            extension: "xyz".to_string(),
        });
        assert_eq!(err.stage(), Stage::Extraction);
        assert_eq!(err.stage().as_str(), "extraction");
        assert_eq!(err.kind(), "unsupported_type");

        let err = PipelineError::from(ClassificationError::Parse {
            raw: "oops".to_string(),
        });
        assert_eq!(err.stage(), Stage::Classification);
        assert_eq!(err.kind(), "json_parse_error");

        let err = PipelineError::from(PlacementError::DestinationExists {
            path: PathBuf::from("/organized/Misc/a.txt"),
        });
        assert_eq!(err.stage(), Stage::Placement);
        assert_eq!(err.kind(), "destination_exists");
    }
}
