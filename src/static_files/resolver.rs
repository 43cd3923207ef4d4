//! Static file resolution under a fixed root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use axum::http::StatusCode;

use crate::config::StaticFilesConfig;
use crate::http::response::Response;
use crate::static_files::mime::content_type_for;

/// Serves files from `root` for request paths starting with `prefix`.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    prefix: String,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    pub fn from_config(config: &StaticFilesConfig) -> Self {
        Self::new(&config.root, config.prefix.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True when `request_path` falls under the static prefix.
    pub fn handles(&self, request_path: &str) -> bool {
        request_path.starts_with(&self.prefix)
    }

    /// Resolve `request_path` to a response.
    ///
    /// 403 for traversal attempts (checked before touching the filesystem),
    /// 404 when no regular file exists, 500 on any other I/O failure.
    pub fn resolve(&self, request_path: &str) -> Response {
        let relative = request_path.strip_prefix(&self.prefix).unwrap_or(request_path);

        if is_unsafe(relative) {
            tracing::error!(path = %request_path, "Blocked unsafe static file access");
            return Response::forbidden();
        }

        let full_path = self.root.join(relative);
        match fs::metadata(&full_path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return file_not_found(request_path, &full_path),
            Err(e) if is_missing(&e) => return file_not_found(request_path, &full_path),
            Err(e) => return read_failed(request_path, &e),
        }

        match fs::read(&full_path) {
            Ok(contents) => {
                let content_type = content_type_for(&full_path);
                tracing::debug!(path = %request_path, content_type, bytes = contents.len(), "Static file served");
                Response::bytes(StatusCode::OK, content_type, contents)
            }
            Err(e) if is_missing(&e) => file_not_found(request_path, &full_path),
            Err(e) => read_failed(request_path, &e),
        }
    }
}

/// Parent-directory segments and absolute paths are rejected outright.
fn is_unsafe(relative: &str) -> bool {
    if relative.starts_with('/') || relative.starts_with('\\') {
        return true;
    }
    if relative.split(['/', '\\']).any(|segment| segment == "..") {
        return true;
    }
    Path::new(relative)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
}

/// A path through a regular file (`hello.txt/x.css`) is as missing as an absent one.
fn is_missing(error: &std::io::Error) -> bool {
    matches!(error.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

fn file_not_found(request_path: &str, full_path: &Path) -> Response {
    tracing::warn!(path = %request_path, file = %full_path.display(), "Static file not found");
    Response::text("404: File Not Found").with_status(StatusCode::NOT_FOUND)
}

fn read_failed(request_path: &str, error: &std::io::Error) -> Response {
    tracing::error!(path = %request_path, error = %error, "Error serving static file");
    Response::internal_error()
}
