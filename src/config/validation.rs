//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream origin
//! - Keep the default document a bare file name
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use hyper::Uri;
use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("upstream.origin '{0}' is not a valid URI")]
    OriginUri(String),

    #[error("upstream.origin '{0}' must use the http scheme")]
    OriginScheme(String),

    #[error("upstream.origin '{0}' must have a host")]
    OriginHost(String),

    #[error("upstream.origin '{0}' must not carry a path or query")]
    OriginPath(String),

    #[error("upstream.api_prefix '{0}' must start with '/' and not end with '/'")]
    ApiPrefix(String),

    #[error("static_files.default_document '{0}' must be a plain file name")]
    DefaultDocument(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    validate_origin(&config.upstream.origin, &mut errors);

    let prefix = &config.upstream.api_prefix;
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::ApiPrefix(prefix.clone()));
    }

    let document = &config.static_files.default_document;
    if document.is_empty() || document.contains(['/', '\\']) || document == ".." {
        errors.push(ValidationError::DefaultDocument(document.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_origin(origin: &str, errors: &mut Vec<ValidationError>) {
    let uri: Uri = match origin.parse() {
        Ok(uri) => uri,
        Err(_) => {
            errors.push(ValidationError::OriginUri(origin.to_string()));
            return;
        }
    };

    if uri.scheme_str() != Some("http") {
        errors.push(ValidationError::OriginScheme(origin.to_string()));
    }
    if uri.host().is_none() {
        errors.push(ValidationError::OriginHost(origin.to_string()));
    }
    let has_path = uri
        .path_and_query()
        .map(|pq| pq.as_str() != "/" && !pq.as_str().is_empty())
        .unwrap_or(false);
    if has_path {
        errors.push(ValidationError::OriginPath(origin.to_string()));
    }
}
