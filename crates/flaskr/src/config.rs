//! Configuration management for flaskr.
//!
//! Configuration is an ordered figment pipeline. The defaults stage depends
//! on the instance directory, and it is followed by exactly one of two
//! override stages:
//!
//! 1. Default values (`secret_key = "dev"`, `database = <instance>/flaskr.sqlite`)
//! 2. Either the optional instance file `<instance>/config.toml` followed by
//!    `FLASKR_`-prefixed environment variables, or an explicit override
//!    mapping supplied by tests.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the optional configuration file inside the instance directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default database file name, relative to the instance directory.
const DATABASE_FILE_NAME: &str = "flaskr.sqlite";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "FLASKR_";

/// Placeholder secret key used during development.
///
/// Deployments must override it from the instance config file or the
/// environment.
pub const DEV_SECRET_KEY: &str = "dev";

/// A string-keyed mapping of configuration overrides.
///
/// Keys absent from the mapping keep their default values. Nested tables
/// (e.g. `server`) are merged key by key.
pub type Overrides = serde_json::Map<String, serde_json::Value>;

/// Where the overrides on top of the defaults come from.
///
/// The two sources are mutually exclusive: supplying an override mapping
/// skips the instance file and the environment entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConfigSource {
    /// Load `<instance>/config.toml` if it exists, then the environment.
    #[default]
    InstanceFile,
    /// Apply this mapping and nothing else.
    Overrides(Overrides),
}

impl From<Option<Overrides>> for ConfigSource {
    fn from(test_config: Option<Overrides>) -> Self {
        test_config.map_or(Self::InstanceFile, Self::Overrides)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Secret used by anything that signs data. Never validated.
    pub secret_key: String,
    /// Path to the `SQLite` database file.
    pub database: PathBuf,
    /// Whether the application is running under tests.
    #[serde(default)]
    pub testing: bool,
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Config {
    /// Built-in defaults for an application rooted at `instance_path`.
    #[must_use]
    pub fn defaults(instance_path: &Path) -> Self {
        Self {
            secret_key: DEV_SECRET_KEY.to_string(),
            database: instance_path.join(DATABASE_FILE_NAME),
            testing: false,
            server: ServerConfig::default(),
        }
    }

    /// Path of the optional configuration file for `instance_path`.
    #[must_use]
    pub fn file_path(instance_path: &Path) -> PathBuf {
        instance_path.join(CONFIG_FILE_NAME)
    }

    /// Build the layered figment without extracting it.
    ///
    /// A missing instance file contributes nothing. Environment keys use `__`
    /// to reach nested tables, e.g. `FLASKR_SERVER__PORT`.
    #[must_use]
    pub fn figment(instance_path: &Path, source: &ConfigSource) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Self::defaults(instance_path)));

        match source {
            ConfigSource::InstanceFile => figment
                .merge(Toml::file(Self::file_path(instance_path)))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
            ConfigSource::Overrides(overrides) => {
                figment.merge(Serialized::defaults(overrides.clone()))
            }
        }
    }

    /// Load and validate configuration for `instance_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed, a value has the wrong
    /// type, or validation fails.
    pub fn load(instance_path: &Path, source: &ConfigSource) -> Result<Self> {
        let config: Config = Self::figment(instance_path, source).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database path is empty or the server port is 0.
    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            return Err(Error::config_validation("database path must not be empty"));
        }

        if self.server.port == 0 {
            return Err(Error::config_validation(
                "server.port must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Whether the development placeholder secret is still in use.
    #[must_use]
    pub fn uses_dev_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }

    /// Render the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use serde_json::json;

    fn overrides(value: serde_json::Value) -> Overrides {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_defaults() {
        let instance = Path::new("/srv/flaskr/instance");
        let config = Config::defaults(instance);

        assert_eq!(config.secret_key, "dev");
        assert_eq!(config.database, instance.join("flaskr.sqlite"));
        assert!(!config.testing);
        assert_eq!(config.server, ServerConfig::default());
        assert!(config.uses_dev_secret());
    }

    #[test]
    fn test_default_server_config() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 5000);
    }

    #[test]
    fn test_file_path() {
        let path = Config::file_path(Path::new("/srv/instance"));
        assert_eq!(path, PathBuf::from("/srv/instance/config.toml"));
    }

    #[test]
    fn test_config_source_from_option() {
        assert_eq!(ConfigSource::from(None), ConfigSource::InstanceFile);

        let map = overrides(json!({"testing": true}));
        assert_eq!(
            ConfigSource::from(Some(map.clone())),
            ConfigSource::Overrides(map)
        );
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        Jail::expect_with(|_| {
            let dir = tempfile::tempdir().unwrap();
            let config = Config::load(dir.path(), &ConfigSource::InstanceFile).unwrap();

            assert_eq!(config, Config::defaults(dir.path()));
            Ok(())
        });
    }

    #[test]
    fn test_load_missing_instance_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let instance = dir.path().join("not-created-yet");
        let config = Config::load(&instance, &ConfigSource::InstanceFile).unwrap();

        assert_eq!(config.database, instance.join("flaskr.sqlite"));
    }

    #[test]
    fn test_load_instance_file_overrides_defaults() {
        Jail::expect_with(|_| {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(
                Config::file_path(dir.path()),
                "secret_key = \"from-file\"\n\n[server]\nport = 8080\n",
            )
            .unwrap();

            let config = Config::load(dir.path(), &ConfigSource::InstanceFile).unwrap();

            assert_eq!(config.secret_key, "from-file");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.database, dir.path().join("flaskr.sqlite"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("FLASKR_SECRET_KEY", "from-env");
            jail.set_env("FLASKR_SERVER__PORT", 8123);

            let dir = tempfile::tempdir().unwrap();
            let config = Config::load(dir.path(), &ConfigSource::InstanceFile).unwrap();

            assert_eq!(config.secret_key, "from-env");
            assert_eq!(config.server.port, 8123);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.database, dir.path().join("flaskr.sqlite"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_instance_file() {
        Jail::expect_with(|jail| {
            jail.set_env("FLASKR_SECRET_KEY", "from-env");

            let dir = tempfile::tempdir().unwrap();
            std::fs::write(
                Config::file_path(dir.path()),
                "secret_key = \"from-file\"\n\n[server]\nport = 8080\n",
            )
            .unwrap();

            let config = Config::load(dir.path(), &ConfigSource::InstanceFile).unwrap();

            assert_eq!(config.secret_key, "from-env");
            assert_eq!(config.server.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn test_overrides_ignore_env() {
        Jail::expect_with(|jail| {
            jail.set_env("FLASKR_SECRET_KEY", "from-env");
            jail.set_env("FLASKR_SERVER__PORT", 8123);

            let dir = tempfile::tempdir().unwrap();
            let source = ConfigSource::Overrides(overrides(json!({"testing": true})));
            let config = Config::load(dir.path(), &source).unwrap();

            assert_eq!(config.secret_key, "dev");
            assert_eq!(config.server.port, 5000);
            assert!(config.testing);
            Ok(())
        });
    }

    #[test]
    fn test_overrides_skip_instance_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            Config::file_path(dir.path()),
            "secret_key = \"from-file\"\n",
        )
        .unwrap();

        let source = ConfigSource::Overrides(overrides(json!({
            "testing": true,
            "database": "/tmp/other.sqlite",
        })));
        let config = Config::load(dir.path(), &source).unwrap();

        assert!(config.testing);
        assert_eq!(config.database, PathBuf::from("/tmp/other.sqlite"));
        assert_eq!(config.secret_key, "dev");
    }

    #[test]
    fn test_overrides_merge_nested_tables() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource::Overrides(overrides(json!({"server": {"port": 9000}})));
        let config = Config::load(dir.path(), &source).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_empty_overrides_equal_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource::Overrides(Overrides::new());
        let config = Config::load(dir.path(), &source).unwrap();

        assert_eq!(config, Config::defaults(dir.path()));
    }

    #[test]
    fn test_malformed_instance_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::file_path(dir.path()), "secret_key = [unclosed").unwrap();

        let err = Config::load(dir.path(), &ConfigSource::InstanceFile).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_wrong_override_type_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ConfigSource::Overrides(overrides(json!({"testing": {"nested": 1}})));

        let err = Config::load(dir.path(), &source).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validate_empty_database() {
        let mut config = Config::defaults(Path::new("/srv/instance"));
        config.database = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("database path"));
    }

    #[test]
    fn test_validate_zero_port() {
        let mut config = Config::defaults(Path::new("/srv/instance"));
        config.server.port = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("server.port"));
    }

    #[test]
    fn test_secret_key_is_not_validated() {
        let mut config = Config::defaults(Path::new("/srv/instance"));
        config.secret_key = String::new();

        assert!(config.validate().is_ok());
        assert!(!config.uses_dev_secret());
    }

    #[test]
    fn test_to_pretty_json() {
        let config = Config::defaults(Path::new("/srv/instance"));
        let json = config.to_pretty_json().unwrap();

        assert!(json.contains("\"secret_key\": \"dev\""));
        assert!(json.contains("flaskr.sqlite"));
        assert!(json.contains("\"port\": 5000"));
    }
}
