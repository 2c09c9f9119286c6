//! Embedded static client bundle
//!
//! In development, falls back to serving from filesystem.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::PathBuf;

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

const UI_DIR: &str = "ui";

fn asset_response(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.as_ref().to_string())], data).into_response()
}

/// Serve embedded static files, with filesystem fallback for development
pub async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    if path.is_empty() || path.contains("..") {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    // Try embedded assets first
    if let Some(content) = Assets::get(path) {
        return asset_response(path, content.data.to_vec());
    }

    // Fallback to filesystem in development
    let fs_path = PathBuf::from(UI_DIR).join(path);
    if let Ok(content) = std::fs::read(&fs_path) {
        return asset_response(path, content);
    }

    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Get the index.html content (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    if let Some(content) = Assets::get("index.html") {
        return String::from_utf8(content.data.to_vec()).ok();
    }

    std::fs::read_to_string(PathBuf::from(UI_DIR).join("index.html")).ok()
}

/// Serve the widget page
pub async fn serve_index() -> Response {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - client bundle not found</h1>".to_string()),
        )
            .into_response(),
    }
}
