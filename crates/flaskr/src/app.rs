//! The application factory.
//!
//! [`create_app`] builds a fully configured [`App`] on every call. Nothing is
//! kept in globals: the instance path is an explicit argument and routes live
//! on the app's own [`Router`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use tracing::{info, warn};

use crate::config::{Config, ConfigSource, Overrides};
use crate::db::{self, Database};
use crate::error::{Error, Result};
use crate::instance::{ensure_instance_dir, resolve_instance_path};
use crate::routes;

/// State shared with request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Final application configuration.
    pub config: Arc<Config>,
    /// Database handle attached by [`db::init_app`].
    pub database: Database,
}

/// A configured application.
#[derive(Debug)]
pub struct App {
    instance_path: PathBuf,
    config: Arc<Config>,
    database: Option<Database>,
    routes: Router<AppState>,
}

impl App {
    fn new(instance_path: PathBuf, config: Config) -> Self {
        Self {
            instance_path,
            config: Arc::new(config),
            database: None,
            routes: Router::new(),
        }
    }

    /// Absolute path of the instance directory.
    #[must_use]
    pub fn instance_path(&self) -> &Path {
        &self.instance_path
    }

    /// The configuration the app was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The database handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseNotInitialized`] if no database was attached.
    pub fn database(&self) -> Result<&Database> {
        self.database.as_ref().ok_or(Error::DatabaseNotInitialized)
    }

    pub(crate) fn set_database(&mut self, database: Database) {
        self.database = Some(database);
    }

    fn register_routes(&mut self, register: impl FnOnce(Router<AppState>) -> Router<AppState>) {
        self.routes = register(std::mem::take(&mut self.routes));
    }

    /// Build the request router with the shared state attached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseNotInitialized`] if no database was attached.
    pub fn router(&self) -> Result<Router> {
        let state = AppState {
            config: Arc::clone(&self.config),
            database: self.database()?.clone(),
        };
        Ok(self.routes.clone().with_state(state))
    }
}

/// Create and configure the application.
///
/// Without `test_config`, the optional `<instance>/config.toml` and the
/// `FLASKR_` environment are layered over the defaults. With it, only the
/// given mapping is applied. The instance directory is created if needed.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or validated, or if the
/// instance directory cannot be created.
pub fn create_app(
    instance_path: impl Into<PathBuf>,
    test_config: Option<Overrides>,
) -> Result<App> {
    let instance_path = resolve_instance_path(instance_path)?;
    let config = Config::load(&instance_path, &ConfigSource::from(test_config))?;

    if config.uses_dev_secret() && !config.testing {
        warn!("Using the development secret key; set `secret_key` in the instance config");
    }

    ensure_instance_dir(&instance_path)?;

    let mut app = App::new(instance_path, config);
    db::init_app(&mut app);
    app.register_routes(routes::register);

    info!("Application created for {}", app.instance_path().display());
    Ok(app)
}
