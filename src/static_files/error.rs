//! Static file errors and their HTTP mapping.

use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while resolving or reading a static file.
#[derive(Debug, Error)]
pub enum StaticFileError {
    /// Nothing at that path, or the path tried to leave the document root.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Any other filesystem failure (permissions, directories, I/O).
    #[error("Server Error: {}", error_code(.source))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl StaticFileError {
    /// Classify a read failure for `path`.
    pub fn from_io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Short error code naming an I/O failure, e.g. `PermissionDenied (os error 13)`.
pub fn error_code(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => format!("{:?} (os error {code})", err.kind()),
        None => format!("{:?}", err.kind()),
    }
}

impl IntoResponse for StaticFileError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
