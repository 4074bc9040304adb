//! Error types for page-translator
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Storage, Session)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes

use crate::types::SessionId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for page-translator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for page-translator
///
/// Every variant is fatal to the action that produced it. Nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "export.default_base_name")
        key: Option<String>,
    },

    /// Writing an uploaded asset to the content directory failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Session lookup or transition failed
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// A static resource (icon, stylesheet) could not be read
    #[error("resource not found at {path}: {reason}")]
    ResourceNotFound {
        /// Path of the missing resource
        path: PathBuf,
        /// Underlying reason
        reason: String,
    },

    /// Base64 input could not be decoded
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Input rejected by a validation rule (e.g., text longer than the input limit)
    #[error("validation error: {0}")]
    Validation(String),

    /// Uploaded file type is not accepted by the image path
    #[error("unsupported asset {name}: allowed extensions are {allowed}")]
    UnsupportedAsset {
        /// Original file name of the upload
        name: String,
        /// Comma-separated list of accepted extensions
        allowed: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Operation not supported (e.g., the voice path)
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// File store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Content directory does not exist
    #[error("content directory {path} does not exist")]
    DirectoryMissing {
        /// The directory that was expected
        path: PathBuf,
    },

    /// A file could not be created inside the content directory
    #[error("content directory {path} is not writable: {reason}")]
    NotWritable {
        /// The directory that rejected the write
        path: PathBuf,
        /// The reason the write was rejected
        reason: String,
    },

    /// Writing or publishing the file failed; no partial file is left behind
    #[error("failed to write {path}: {reason}")]
    WriteFailed {
        /// The destination path
        path: PathBuf,
        /// The reason the write failed
        reason: String,
    },

    /// File collision at destination
    #[error("file collision at {path}: {reason}")]
    FileCollision {
        /// The path where the collision occurred
        path: PathBuf,
        /// The reason for the collision (e.g., "file already exists")
        reason: String,
    },

    /// The upload's file name has no usable base name
    #[error("invalid file name {name:?}: {reason}")]
    InvalidName {
        /// The file name as supplied by the client
        name: String,
        /// Why it cannot be used
        reason: String,
    },
}

/// Session lookup and transition errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session with this ID is registered
    #[error("session {id} not found")]
    NotFound {
        /// The session ID that was not found
        id: SessionId,
    },

    /// Action rejected because its precondition does not hold
    #[error("cannot {operation} in session {id} while {current_state}")]
    InvalidState {
        /// The session the action was dispatched to
        id: SessionId,
        /// The rejected action (e.g., "process")
        operation: String,
        /// The state that blocked it (e.g., "idle", "process control disabled")
        current_state: String,
    },
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "session_not_found",
///     "message": "session error: session 7 not found",
///     "details": {
///       "session_id": 7
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "not_found", "validation_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create a "not found" error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new("not_found", format!("{} not found", resource.into()))
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - Client error (invalid input)
            Error::Config { .. } => 400,
            Error::Validation(_) => 400,
            Error::Encoding(_) => 400,
            Error::Storage(StorageError::InvalidName { .. }) => 400,

            // 404 Not Found
            Error::Session(SessionError::NotFound { .. }) => 404,

            // 409 Conflict - precondition of the action does not hold
            Error::Session(SessionError::InvalidState { .. }) => 409,
            Error::Storage(StorageError::FileCollision { .. }) => 409,

            // 415 Unsupported Media Type
            Error::UnsupportedAsset { .. } => 415,

            // 500 Internal Server Error - Server-side issues
            Error::Storage(_) => 500,
            Error::ResourceNotFound { .. } => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,

            // 501 Not Implemented - Feature not supported
            Error::NotSupported(_) => 501,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Storage(e) => match e {
                StorageError::DirectoryMissing { .. } => "directory_missing",
                StorageError::NotWritable { .. } => "not_writable",
                StorageError::WriteFailed { .. } => "write_failed",
                StorageError::FileCollision { .. } => "file_collision",
                StorageError::InvalidName { .. } => "invalid_name",
            },
            Error::Session(e) => match e {
                SessionError::NotFound { .. } => "session_not_found",
                SessionError::InvalidState { .. } => "invalid_state",
            },
            Error::ResourceNotFound { .. } => "resource_not_found",
            Error::Encoding(_) => "encoding_error",
            Error::Validation(_) => "validation_error",
            Error::UnsupportedAsset { .. } => "unsupported_asset",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::NotSupported(_) => "not_supported",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        let details = match &error {
            Error::Session(SessionError::NotFound { id }) => Some(serde_json::json!({
                "session_id": id,
            })),
            Error::Session(SessionError::InvalidState {
                id,
                operation,
                current_state,
            }) => Some(serde_json::json!({
                "session_id": id,
                "operation": operation,
                "current_state": current_state,
            })),
            Error::Storage(StorageError::DirectoryMissing { path })
            | Error::Storage(StorageError::NotWritable { path, .. })
            | Error::Storage(StorageError::WriteFailed { path, .. })
            | Error::Storage(StorageError::FileCollision { path, .. }) => {
                Some(serde_json::json!({
                    "path": path,
                }))
            }
            Error::ResourceNotFound { path, .. } => Some(serde_json::json!({
                "path": path,
            })),
            Error::UnsupportedAsset { name, .. } => Some(serde_json::json!({
                "name": name,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
