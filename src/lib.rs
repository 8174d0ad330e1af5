pub mod classifier;
pub mod config;
pub mod constants;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod placer;
pub mod server;
pub mod utils;
pub mod watcher;

pub use classifier::{ChatModel, Classifier};
pub use errors::{ClassificationError, ExtractionError, PipelineError, PlacementError};
pub use models::{Classification, DocumentKind, Excerpt, Placement, Stage};
pub use pipeline::Pipeline;
pub use placer::Placer;
pub use watcher::InboxWatcher;
