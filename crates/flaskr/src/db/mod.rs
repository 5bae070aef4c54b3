//! Database layer for flaskr.
//!
//! The application holds a [`Database`] handle, which is only a path. Each
//! request or command opens its own connection with [`Database::connect`],
//! and the connection is closed when it is dropped.

pub mod schema;

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info};

use crate::app::App;
use crate::error::{Error, Result};

/// Handle to the application's `SQLite` database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    /// Path to the database file.
    path: PathBuf,
}

impl Database {
    /// Create a handle for the database at `path`. Nothing is opened yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new connection with foreign key enforcement enabled.
    ///
    /// The file is created if missing, but its directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn connect(&self) -> Result<Connection> {
        debug!("Opening database at {}", self.path.display());
        let conn = Connection::open(&self.path).map_err(|source| Error::DatabaseOpen {
            path: self.path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Clear existing data and create new tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or a statement fails.
    pub fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        for statement in schema::SCHEMA_STATEMENTS {
            conn.execute_batch(statement)?;
        }

        info!("Initialized database schema at {}", self.path.display());
        Ok(())
    }
}

/// Attach the database for `app`'s configured path.
///
/// Called once by the application factory, after configuration is final and
/// the instance directory exists.
pub fn init_app(app: &mut App) {
    let database = Database::new(app.config().database.clone());
    debug!("Registered database {}", database.path().display());
    app.set_database(database);
}
