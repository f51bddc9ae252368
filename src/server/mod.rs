use axum::{
    routing::{get, put, post, delete},
    http::HeaderValue,
    extract::{DefaultBodyLimit, Request},
    response::IntoResponse,
    Json,
    Router,
    ServiceExt
};

use serde_json::json;

use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower::Layer;


use http::header::CONTENT_TYPE;

use anyhow;

use crate::config::Config;

use crate::handlers::templates::{
    index,
    get_email_layout,
    save_template,
    get_all_templates,
    update_template,
    delete_template,
    render_and_download,
};

use crate::handlers::uploads::{
    upload_image,
    serve_upload,
};

// Slack on top of the configured image limit so multipart framing does not
// trip the body limit before our own size check runs.
const UPLOAD_BODY_OVERHEAD: usize = 1024 * 1024;

pub struct Server{
    state: Arc<AppState>,
}

pub use crate::AppState;

impl Server {

    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state
        }
    }

    pub fn setup_cors(&self, config: &Config) -> CorsLayer {

        let mut layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(vec![CONTENT_TYPE]);

        layer = match &config.server.http.allow_origin {
            Some(origins) if !origins.is_empty() &&
            !origins.contains(&"".to_string()) &&
            !origins.contains(&"*".to_string()) => {
                let origins = origins.iter().filter_map(|s| s.parse::<HeaderValue>().ok()).collect::<Vec<_>>();
                layer.allow_origin(origins)
            },
            _ => layer,
        };

        layer
    }

    pub async fn run(&self) -> Result<(), anyhow::Error> {

        let addr = self.state.config.http_addr();

        let upload_routes = Router::new()
            .route("/uploadImage", post(upload_image))
            .layer(DefaultBodyLimit::max(self.state.storage.max_bytes() + UPLOAD_BODY_OVERHEAD))
            .route("/uploads/{file}", get(serve_upload));

        let template_routes = Router::new()
            .route("/getEmailLayout", get(get_email_layout))
            .route("/uploadEmailConfig", post(save_template))
            .route("/getAllTemplates", get(get_all_templates))
            .route("/updateTemplate/{id}", put(update_template))
            .route("/deleteTemplate/{id}", delete(delete_template))
            .route("/renderAndDownloadTemplate", post(render_and_download));

        let base_routes = Router::new()
            .route("/health", get(health))
            .route("/version", get(version))
            .route("/", get(index));

        let app = Router::new()
            .merge(template_routes)
            .merge(upload_routes)
            .merge(base_routes)
            .layer(self.setup_cors(&self.state.config))
            .layer(TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let path = request.uri().path().to_owned();
                    let method = request.method().clone();
                    tracing::info_span!("http-request", %path, %method)
                })
                .on_request(|_request: &hyper::Request<_>, _span: &tracing::Span| {
                    tracing::event!(tracing::Level::INFO, "request received");
                })
                .on_response(|response: &hyper::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                    let status = response.status().as_u16();
                    tracing::event!(tracing::Level::INFO, status = status, latency = ?latency, "sent response");
                })
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!("request failed: {}", error);
                })
            )
            .with_state(self.state.clone());

        let app = NormalizePathLayer::trim_trailing_slash()
            .layer(app);


        if let Ok(listener) = tokio::net::TcpListener::bind(addr.clone()).await {
            tracing::info!("Listening on {}", addr);
            axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
        } else {
            tracing::error!("Failed to bind to address: {}", addr);
            std::process::exit(1);
        }

        Ok(())
    }
}

pub async fn health(
) -> Result<impl IntoResponse, ()> {

    Ok(Json(json!({
        "healthy": true,
    })))
}

pub async fn version(
) -> Result<impl IntoResponse, ()> {

    let version = env!("CARGO_PKG_VERSION");
    let hash = env!("GIT_COMMIT_HASH");

    Ok(Json(json!({
        "version": version,
        "commit": hash,
    })))
}
