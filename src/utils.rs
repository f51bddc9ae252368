use regex::Regex;
use once_cell::sync::Lazy;

use rand::Rng;

use axum::http::HeaderMap;
use chrono::Utc;
use std::path::Path;

static EXTENSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());

/// Lowercased extension of the original filename, dot included, stripped of
/// anything outside [a-z0-9]. Empty when the name has no extension.
pub fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", EXTENSION_REGEX.replace_all(ext, "").to_lowercase()))
        .unwrap_or_default()
}

/// Collision-resistant upload name: millisecond timestamp plus a random
/// suffix, preserving the original extension.
pub fn unique_upload_name(original: &str) -> String {
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!("{}-{}{}", Utc::now().timestamp_millis(), suffix, file_extension(original))
}

/// Base URL as seen by the client, honoring reverse-proxy forwarding
/// headers. Falls back to plain http and localhost.
pub fn request_base_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(http::header::HOST))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}

pub fn content_type_for(filename: &str) -> &'static str {
    match file_extension(filename).as_str() {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        _ => "application/octet-stream",
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("photo.PNG"), ".png");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("noext"), "");
        assert_eq!(file_extension("weird.p~n!g"), ".png");
    }

    #[test]
    fn test_unique_upload_name_shape() {
        let name = unique_upload_name("photo.jpeg");
        assert!(name.ends_with(".jpeg"));

        let stem = name.strip_suffix(".jpeg").unwrap();
        let (millis, suffix) = stem.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert!(suffix.parse::<u32>().is_ok());

        assert_ne!(unique_upload_name("a.png"), unique_upload_name("a.png"));
    }

    #[test]
    fn test_request_base_url() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_base_url(&headers), "http://localhost");

        headers.insert(http::header::HOST, HeaderValue::from_static("api.example.com:3000"));
        assert_eq!(request_base_url(&headers), "http://api.example.com:3000");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("mail.example.com"));
        assert_eq!(request_base_url(&headers), "https://mail.example.com");
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
    }
}
