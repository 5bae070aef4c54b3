//! `flaskr` - a tutorial web application built around an application factory.
//!
//! [`create_app`] merges configuration, prepares the instance directory,
//! attaches the `SQLite` database and registers the HTTP routes.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod instance;
pub mod logging;
pub mod routes;
pub mod server;

pub use app::{create_app, App, AppState};
pub use config::{Config, ConfigSource, Overrides};
pub use db::Database;
pub use error::{Error, Result};
pub use logging::init_logging;
