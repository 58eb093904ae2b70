//! Route handlers

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use sf_core::OutfitAnalysis;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the Style-Finder API";

const UPLOAD_FIELD: &str = "file";
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/api/analyze", post(analyze_outfit))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn read_root() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

struct Upload {
    content_type: String,
    bytes: Bytes,
}

/// Find the `file` field; the media type is checked before the body is read
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(ApiError::NotAnImage);
        }

        let bytes = field
            .bytes()
            .await
            .map_err(upload_error)?;

        return Ok(Upload {
            content_type,
            bytes,
        });
    }

    Err(ApiError::MissingFile)
}

fn upload_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::TooLarge(MAX_UPLOAD_BYTES)
    } else {
        ApiError::BadUpload(err.body_text())
    }
}

async fn analyze_outfit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OutfitAnalysis>, ApiError> {
    let mut multipart = multipart.map_err(|_| ApiError::MissingFile)?;
    let upload = read_upload(&mut multipart).await?;

    info!(
        content_type = %upload.content_type,
        bytes = upload.bytes.len(),
        model = state.model.model_id(),
        "Analyzing outfit"
    );

    let reply = state
        .model
        .describe_image(&upload.bytes, &upload.content_type, &state.prompt)
        .await
        .map_err(|e| {
            warn!(error = %e, "Vision model call failed");
            ApiError::from(e)
        })?;

    Ok(Json(state.parser.parse(&reply)))
}
