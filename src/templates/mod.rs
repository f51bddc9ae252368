use std::path::PathBuf;

use crate::config::Config;
use crate::db::templates::EmailTemplate;

pub const TITLE_TOKEN: &str = "{{title}}";
pub const CONTENT_TOKEN: &str = "{{content}}";
pub const FOOTER_TOKEN: &str = "{{footer}}";
pub const IMAGE_URL_TOKEN: &str = "{{imageUrl}}";


/// The shared HTML layout file. It is read per request so the
/// unreadable-file case surfaces on the endpoint that needed it.
#[derive(Debug, Clone)]
pub struct EmailLayout {
    path: PathBuf,
}

impl EmailLayout {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.layout.path.clone(),
        }
    }

    pub async fn load(&self) -> Result<String, std::io::Error> {
        tokio::fs::read_to_string(&self.path).await
    }
}

/// Replaces the first occurrence of each placeholder token with the given
/// value. Substitution is literal: no escaping, no nesting, no loops. The
/// client-side preview performs the same substitution, so the two surfaces
/// never diverge.
pub fn render(layout: &str, title: &str, content: &str, footer: &str, image_url: &str) -> String {
    layout
        .replacen(TITLE_TOKEN, title, 1)
        .replacen(CONTENT_TOKEN, content, 1)
        .replacen(FOOTER_TOKEN, footer, 1)
        .replacen(IMAGE_URL_TOKEN, image_url, 1)
}

pub fn render_template(layout: &str, template: &EmailTemplate) -> String {
    render(
        layout,
        &template.template_name,
        &template.body,
        &template.footer,
        &template.image_url,
    )
}
