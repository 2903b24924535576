// Configuration module entry point
// Loads application configuration and holds runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::Path;

pub use state::AppState;
pub use types::{AppConfig, Config, UsersConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

const DOTENV_PATH: &str = ".env";

/// Bare environment variables honoured on top of the `APP_` prefixed ones
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    /// `PORT`
    pub port: Option<String>,
    /// `APP_ENV`
    pub environment: Option<String>,
}

impl EnvOverrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT").ok(),
            environment: std::env::var("APP_ENV").ok(),
        }
    }
}

impl Config {
    /// Load `.env` from the working directory, then build the configuration
    /// from `config_path` and the process environment
    pub fn load(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_dotenv(Path::new(DOTENV_PATH), config_path)
    }

    /// Like [`Self::load`] with an explicit `.env` path.
    ///
    /// Variables already set in the process are not overwritten.
    pub fn load_with_dotenv(
        dotenv_path: &Path,
        config_path: &str,
    ) -> Result<Self, config::ConfigError> {
        // A missing .env file is fine; the defaults cover everything
        let _ = dotenvy::from_path(dotenv_path);
        Self::load_from(config_path, config_source_env(), &EnvOverrides::from_env())
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(
        config_path: &str,
        environment: config::Environment,
        overrides: &EnvOverrides,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("app.environment", "development")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 30)?
            .set_default("performance.backlog", 128)?
            .set_default("performance.shutdown_grace", 10)?
            .set_default("http.server_name", "user-api/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("users.auth_failure_demo", false)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(environment)
            .set_override_option("server.port", overrides.port.clone())?
            .set_override_option("app.environment", overrides.environment.clone())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// `APP_` prefixed variables, `__` between section and key
fn config_source_env() -> config::Environment {
    config::Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
impl Config {
    /// Built-in defaults only, ignoring files and the process environment
    pub fn test_config() -> Self {
        Self::load_from(
            "does-not-exist/config",
            config_source_env().source(Some(config::Map::new())),
            &EnvOverrides::default(),
        )
        .expect("defaults must deserialize")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env_from(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config_source_env().source(Some(map))
    }

    fn load(vars: &[(&str, &str)], overrides: &EnvOverrides) -> Result<Config, config::ConfigError> {
        Config::load_from("does-not-exist/config", env_from(vars), overrides)
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[], &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.server.workers.is_none());
        assert!(!cfg.app.is_production());
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert!(!cfg.users.auth_failure_demo);
        assert_eq!(cfg.performance.connection_timeout, 30);
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 5000);
    }

    #[test]
    fn test_port_override() {
        let overrides = EnvOverrides {
            port: Some("8081".to_string()),
            environment: Some("production".to_string()),
        };
        let cfg = load(&[], &overrides).unwrap();
        assert_eq!(cfg.server.port, 8081);
        assert!(cfg.app.is_production());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let overrides = EnvOverrides {
            port: Some("not-a-port".to_string()),
            environment: None,
        };
        assert!(load(&[], &overrides).is_err());
    }

    #[test]
    fn test_prefixed_env_vars() {
        let cfg = load(
            &[
                ("APP_LOGGING__LEVEL", "debug"),
                ("APP_USERS__AUTH_FAILURE_DEMO", "true"),
                ("APP_PERFORMANCE__CONNECTION_TIMEOUT", "5"),
            ],
            &EnvOverrides::default(),
        )
        .unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.users.auth_failure_demo);
        assert_eq!(cfg.performance.connection_timeout, 5);
    }

    #[test]
    fn test_dotenv_file_feeds_environment() {
        let dir = tempfile::tempdir().unwrap();
        let dotenv = dir.path().join(".env");
        std::fs::write(
            &dotenv,
            "APP_HTTP__SERVER_NAME=from-dotenv\nAPP_HTTP__MAX_BODY_SIZE=2048\n",
        )
        .unwrap();

        let cfg = Config::load_with_dotenv(&dotenv, "does-not-exist/config").unwrap();
        assert_eq!(cfg.http.server_name, "from-dotenv");
        assert_eq!(cfg.http.max_body_size, 2048);
    }

    #[test]
    fn test_missing_dotenv_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_with_dotenv(&dir.path().join(".env"), "does-not-exist/config");
        assert!(cfg.is_ok());
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 7000\nworkers = 2\n\n[http]\nserver_name = \"test\"").unwrap();

        let base = dir.path().join("config");
        let cfg = Config::load_from(
            base.to_str().unwrap(),
            env_from(&[]),
            &EnvOverrides::default(),
        )
        .unwrap();
        assert_eq!(cfg.server.port, 7000);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.http.server_name, "test");

        // PORT wins over the file
        let cfg = Config::load_from(
            base.to_str().unwrap(),
            env_from(&[]),
            &EnvOverrides {
                port: Some("9000".to_string()),
                environment: None,
            },
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
    }
}
