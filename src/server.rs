use crate::config::Config;
use crate::constants::SUPPORTED_EXTENSIONS;
use crate::pipeline::Pipeline;
use crate::utils;
use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared state for the upload endpoint
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    inbox: PathBuf,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, inbox: PathBuf) -> Self {
        Self { pipeline, inbox }
    }
}

/// Uniform JSON envelope returned to upload clients. Detailed failure kinds
/// stay in the logs.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub message: String,
}

impl UploadResponse {
    fn success(message: String) -> Self {
        Self {
            status: "success",
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            status: "error",
            message,
        }
    }
}

/// Build the HTTP router: `POST /upload` and `GET /health`, permissive CORS.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Bootstrap directories, build the pipeline, and serve until shutdown.
pub async fn serve(config: Config) -> Result<()> {
    let inbox = config.storage.inbox_dir();
    std::fs::create_dir_all(&inbox)
        .with_context(|| format!("Failed to create inbox directory: {}", inbox.display()))?;
    let organized = config.storage.organized_root();
    std::fs::create_dir_all(&organized)
        .with_context(|| format!("Failed to create organized root: {}", organized.display()))?;

    let pipeline = Arc::new(Pipeline::from_config(&config)?);
    let state = AppState::new(pipeline, inbox);
    let router = build_router(state, config.server.max_upload_bytes);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "docshelf server listening");

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}

async fn health() -> &'static str {
    "OK"
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<UploadResponse>) {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(UploadResponse::error("Missing 'file' field".to_string())),
                )
            }
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(UploadResponse::error(format!(
                        "Failed to read multipart body: {}",
                        e
                    ))),
                )
            }
        }
    };

    // Keep only the final component of whatever name the client sent
    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .and_then(|name| {
            Path::new(&name)
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.to_string())
        })
        .unwrap_or_default();

    if !is_supported_upload(&filename) {
        return (
            StatusCode::BAD_REQUEST,
            Json(UploadResponse::error(
                "Only .txt, .pdf or .docx files allowed".to_string(),
            )),
        );
    }

    let data = match field.bytes().await {
        Ok(data) => data,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(UploadResponse::error(format!(
                    "Failed to read uploaded file: {}",
                    e
                ))),
            )
        }
    };

    tracing::info!(file = %filename, bytes = data.len(), "received upload");

    let fingerprint = blake3::hash(&data).to_hex().to_string();
    let stored = utils::collision_free_path(&state.inbox, &filename, &fingerprint);
    if let Err(e) = tokio::fs::write(&stored, &data).await {
        tracing::error!(file = %filename, error = %e, "failed to persist upload");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(UploadResponse::error("Failed to store upload".to_string())),
        );
    }

    match state.pipeline.process(&stored).await {
        Ok(placement) => (
            StatusCode::OK,
            Json(UploadResponse::success(format!(
                "Uploaded and processed: {}",
                placement.destination.display()
            ))),
        ),
        Err(e) => {
            tracing::error!(
                file = %filename,
                stage = e.stage().as_str(),
                kind = e.kind(),
                error = %e,
                "upload processing failed"
            );
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(UploadResponse::error(format!(
                    "Processing failed at the {} stage",
                    e.stage()
                ))),
            )
        }
    }
}

/// Whether the uploaded filename carries one of the accepted extensions.
pub fn is_supported_upload(filename: &str) -> bool {
    utils::get_extension(Path::new(filename))
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_upload() {
        assert!(is_supported_upload("report.pdf"));
        assert!(is_supported_upload("report.PDF"));
        assert!(is_supported_upload("letter.docx"));
        assert!(is_supported_upload("notes.txt"));
        assert!(!is_supported_upload("notes.xyz"));
        assert!(!is_supported_upload("archive.zip"));
        assert!(!is_supported_upload("README"));
        assert!(!is_supported_upload(""));
    }

    #[test]
    fn test_upload_response_envelope_shape() {
        let ok = serde_json::to_value(UploadResponse::success("done".to_string())).unwrap();
        assert_eq!(ok["status"], "success");
        assert_eq!(ok["message"], "done");

        let err = serde_json::to_value(UploadResponse::error("nope".to_string())).unwrap();
        assert_eq!(err["status"], "error");
    }
}
