pub use crate::AppState;

use serde_json::{json, Value};
use std::sync::Arc;

use axum::{
    extract::{State, Path},
    response::IntoResponse,
    http::{StatusCode, header},
    Json,
};

use tracing::info;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::templates::TemplateFields;
use crate::error::ApiError;
use crate::templates::render_template;

pub const DOWNLOAD_FILENAME: &str = "emailTemplate.html";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub footer: String,
    #[serde(default)]
    pub image_url: String,
}

impl TemplatePayload {
    /// Boundary validation: wrong-typed fields and missing required fields
    /// both map to a 400, never to the framework's default rejection.
    pub fn parse(value: Value) -> Result<Self, ApiError> {
        let payload: TemplatePayload = serde_json::from_value(value)
            .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))?;

        if payload.template_name.is_empty() || payload.body.is_empty() {
            return Err(ApiError::Validation(
                "Template name and body are required".to_string(),
            ));
        }

        Ok(payload)
    }

    pub fn into_fields(self) -> TemplateFields {
        TemplateFields {
            template_name: self.template_name,
            body: self.body,
            footer: self.footer,
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(default)]
    pub template_name: String,
}

fn parse_template_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::InvalidId)
}


pub async fn index() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Your server is running",
    }))
}

pub async fn get_email_layout(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {

    let layout = state.layout.load().await?;

    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], layout))
}

pub async fn save_template(
    State(state): State<Arc<AppState>>,
    Json(value): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {

    let payload = TemplatePayload::parse(value)?;

    let template = state.db.templates.create(&payload.into_fields()).await?;

    info!("Saved template '{}' as {}", template.template_name, template.id);

    Ok((StatusCode::CREATED, Json(json!({
        "message": "Configuration saved successfully",
        "emailConfig": template,
    }))))
}

pub async fn get_all_templates(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {

    let templates = state.db.templates.get_all().await?;

    Ok(Json(templates))
}

pub async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(value): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_template_id(&id)?;
    let payload = TemplatePayload::parse(value)?;

    let template = state.db.templates.update(id, &payload.into_fields())
        .await?
        .ok_or_else(|| ApiError::NotFound("Email configuration not found".to_string()))?;

    info!("Updated template {}", template.id);

    Ok(Json(json!({
        "message": "Email configuration updated successfully",
        "emailConfig": template,
    })))
}

pub async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_template_id(&id)?;

    let deleted = state.db.templates.delete(id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Template not found".to_string()));
    }

    info!("Deleted template {}", id);

    Ok(Json(json!({
        "message": "Template deleted successfully",
    })))
}

pub async fn render_and_download(
    State(state): State<Arc<AppState>>,
    Json(value): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {

    let payload: RenderRequest = serde_json::from_value(value)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))?;

    if payload.template_name.is_empty() {
        return Err(ApiError::Validation("Template name is required".to_string()));
    }

    let template = state.db.templates.find_by_name(&payload.template_name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?;

    let layout = state.layout.load().await?;

    let rendered = render_template(&layout, &template);

    info!("Rendered template '{}' for download", template.template_name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        rendered,
    ))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_requires_name_and_body() {
        let err = TemplatePayload::parse(json!({ "body": "Hello" })).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = TemplatePayload::parse(json!({ "templateName": "Promo" })).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = TemplatePayload::parse(json!({ "templateName": "", "body": "Hello" })).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_payload_optional_fields_default_empty() {
        let payload = TemplatePayload::parse(json!({
            "templateName": "Promo",
            "body": "Hello",
        }))
        .unwrap();

        assert_eq!(payload.footer, "");
        assert_eq!(payload.image_url, "");

        let fields = payload.into_fields();
        assert_eq!(fields.template_name, "Promo");
        assert_eq!(fields.footer, "");
    }

    #[test]
    fn test_payload_rejects_wrong_types() {
        let err = TemplatePayload::parse(json!({
            "templateName": "Promo",
            "body": "Hello",
            "footer": 42,
        }))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = TemplatePayload::parse(json!({
            "templateName": "Promo",
            "body": "Hello",
            "imageUrl": ["not", "a", "string"],
        }))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = TemplatePayload::parse(json!("not an object")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_invalid_template_id() {
        assert!(matches!(parse_template_id("not-an-id"), Err(ApiError::InvalidId)));
        assert!(parse_template_id("7b7f3a0a-4a87-4a2e-9d2e-0a9c8e1f2b3c").is_ok());
    }
}
