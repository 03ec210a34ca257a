//! Static Asset Responder
//!
//! Serves the browser UI (form, results table, scripts) from a public directory for any
//! request that doesn't hit an API route.

use super::handlers::handle_not_found;

use axum::{
    Extension,
    http::{Method, Uri, header},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone)]
pub struct StaticAssets {
    root: PathBuf,
}

impl StaticAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path onto a file under the root.
    ///
    /// `/` maps to `index.html`. Returns `None` for anything that would leave
    /// the root (`..`, absolute or prefixed components).
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let relative = request_path.trim_start_matches('/');
        let relative = if relative.is_empty() {
            INDEX_FILE
        } else {
            relative
        };

        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }

        Some(self.root.join(relative))
    }
}

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub async fn handle_static(
    Extension(assets): Extension<Arc<StaticAssets>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return handle_not_found().await.into_response();
    }

    let Some(path) = assets.resolve(uri.path()) else {
        tracing::debug!("Refused static path {}", uri.path());
        return handle_not_found().await.into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(content) => {
            tracing::debug!("Serving {}", path.display());
            ([(header::CONTENT_TYPE, content_type_for(&path))], content).into_response()
        }
        Err(e) => {
            tracing::debug!("Static file {} unavailable: {}", path.display(), e);
            handle_not_found().await.into_response()
        }
    }
}
