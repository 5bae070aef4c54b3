//! Error types for flaskr.
//!
//! Every fallible operation in the crate returns [`Result`], so the binary can
//! report configuration, filesystem, and database failures uniformly.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flaskr operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Database Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database statement failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The application was used before `db::init_app` attached a database.
    #[error("database has not been initialized for this application")]
    DatabaseNotInitialized,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Server Errors ===
    /// The HTTP listener could not be bound.
    #[error("failed to bind server to {addr}: {source}")]
    ServerBind {
        /// Address the server tried to listen on.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flaskr operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a server bind error for the given address.
    #[must_use]
    pub fn server_bind(addr: impl Into<String>, source: std::io::Error) -> Self {
        Self::ServerBind {
            addr: addr.into(),
            source,
        }
    }

    /// Check if this error came from creating a directory.
    #[must_use]
    pub fn is_directory_create(&self) -> bool {
        matches!(self, Self::DirectoryCreate { .. })
    }

    /// Check if this error came from loading or validating configuration.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad(_) | Self::ConfigValidation { .. })
    }
}
