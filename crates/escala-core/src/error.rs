//! Core error types for escala-core.
//!
//! This module defines the error hierarchy using thiserror so that
//! storage, configuration, and validation failures stay distinguishable
//! at the CLI boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for escala-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path:?}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Record lookup came back empty
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path:?}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path:?}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
///
/// These cover the rejections that happen before the suggestion pipeline
/// runs: missing input, missing scope, insufficient role.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Required field was not supplied
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Caller's role does not permit the operation
    #[error("Operation requires the {required} role")]
    NotAuthorized { required: &'static str },

    /// Caller has no church scope
    #[error("No church associated with this account")]
    MissingChurchScope,

    /// A string did not match any known enumeration value
    #[error("Unknown value for '{field}': {value}")]
    UnknownValue { field: &'static str, value: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
