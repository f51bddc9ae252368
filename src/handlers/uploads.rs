pub use crate::AppState;

use serde_json::json;
use std::sync::Arc;

use axum::{
    extract::{State, Path, Multipart},
    response::{IntoResponse, Response},
    http::{HeaderMap, header},
    Json,
};

use tracing::info;

use crate::error::ApiError;
use crate::storage::Storage;
use crate::utils::{content_type_for, request_base_url};

pub const UPLOAD_FIELD: &str = "image";

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        // Type check comes first so unsupported uploads never touch disk.
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !Storage::accepts(&content_type) {
            return Err(ApiError::UnsupportedType(content_type));
        }

        let original_name = field.file_name().unwrap_or_default().to_string();

        let data = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read upload body: {}", e);
            ApiError::TooLarge(state.storage.max_bytes())
        })?;

        let filename = state.storage.store(&original_name, data).await?;

        let image_url = format!(
            "{}{}/{}",
            request_base_url(&headers),
            state.config.uploads.public_path,
            filename,
        );

        info!("Upload available at {}", image_url);

        return Ok(Json(json!({ "imageUrl": image_url })));
    }

    Err(ApiError::Validation("No file uploaded".to_string()))
}

pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {

    let data = state.storage.read(&filename).await?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&filename).to_string()),
            (header::CACHE_CONTROL, "no-store".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", filename),
            ),
        ],
        data,
    )
        .into_response())
}
