use std::path::PathBuf;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::{debug, error};
use serde_json::json;

use crate::types::MediaKind;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{kind} category does not exist: {key}")]
    CategoryNotFound { kind: MediaKind, key: String },

    #[error("failed to {operation} {}: {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io { operation, path: path.into(), source }
    }

    /// Message safe to hand to clients: category vocabulary only, never filesystem paths.
    pub fn public_message(&self) -> String {
        match self {
            CatalogError::CategoryNotFound { kind, key } => format!("{} category '{}' does not exist", kind, key),
            CatalogError::Io { .. } => "failed to read media catalog".to_string(),
        }
    }
}

impl ResponseError for CatalogError {
    fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::CategoryNotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            CatalogError::CategoryNotFound { kind, key } => debug!("rejected unknown {} category {:?}", kind, key),
            CatalogError::Io { .. } => error!("{}", self),
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.public_message() }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read categories file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid categories file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid {kind} category key '{key}': {reason}")]
    InvalidKey { kind: MediaKind, key: String, reason: &'static str },

    #[error("duplicate {kind} category key '{key}'")]
    DuplicateKey { kind: MediaKind, key: String },
}
