//! Static file responder.
//!
//! # Responsibilities
//! - Map a URL path onto the document root
//! - Serve the default document for `/`
//! - Keep resolved paths inside the root
//! - Read the file and label it with a content type
//!
//! # Design Decisions
//! - Percent-encoded paths are decoded before lookup
//! - `..` segments are refused and reported as not found
//! - No directory listing, no conditional GET: every request re-reads

use std::path::{Component, Path, PathBuf};

use axum::http::header;
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::config::StaticFilesConfig;
use crate::static_files::{content_type_for, StaticFileError};

/// Serves files from a document root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    default_document: String,
}

/// A URL path resolved against the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Root-relative path as shown to clients, always starting with `/`.
    pub display: String,
    /// Filesystem location.
    pub path: PathBuf,
}

impl StaticFiles {
    pub fn new(config: &StaticFilesConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            default_document: config.default_document.clone(),
        }
    }

    /// Map a URL path (no query) to a file under the root.
    pub fn resolve(&self, url_path: &str) -> Result<ResolvedFile, StaticFileError> {
        let decoded = percent_decode_str(url_path).decode_utf8_lossy();
        let relative = decoded.trim_start_matches('/');
        let relative = if relative.is_empty() {
            self.default_document.as_str()
        } else {
            relative
        };

        let mut clean = PathBuf::new();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => clean.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    tracing::warn!(path = %decoded, "Path traversal attempt blocked");
                    return Err(StaticFileError::NotFound {
                        path: decoded.to_string(),
                    });
                }
            }
        }

        let display = format!("/{}", clean.to_string_lossy().replace('\\', "/"));
        Ok(ResolvedFile {
            path: self.root.join(&clean),
            display,
        })
    }

    /// Read the file behind `url_path` and build a 200 response.
    pub async fn serve(&self, url_path: &str) -> Result<Response, StaticFileError> {
        let file = self.resolve(url_path)?;

        let content = match tokio::fs::read(&file.path).await {
            Ok(content) => content,
            Err(e) => {
                let err = StaticFileError::from_io(file.display, e);
                match &err {
                    StaticFileError::NotFound { path } => {
                        tracing::info!(path = %path, "File not found");
                    }
                    StaticFileError::Io { path, source } => {
                        tracing::error!(
                            path = %path,
                            file = %file.path.display(),
                            error = %source,
                            "Failed to read file"
                        );
                    }
                }
                return Err(err);
            }
        };

        let content_type = content_type_for(&file.path);
        tracing::debug!(
            path = %file.display,
            content_type,
            bytes = content.len(),
            "Serving static file"
        );

        Ok(([(header::CONTENT_TYPE, content_type)], content).into_response())
    }
}
