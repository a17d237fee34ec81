//! API server configuration module.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PETVAX__SECTION__KEY`, e.g. `PETVAX__SERVER__PORT`)
//! 2. Config file (`petvax.toml`, or the path in `PETVAX_CONFIG`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use lettre::message::Mailbox;
use petvax_db::DbConfig;
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PETVAX_CONFIG";

/// Config file read when [`CONFIG_PATH_ENV`] is unset. Optional.
pub const DEFAULT_CONFIG_FILE: &str = "petvax.toml";

/// API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub notification: NotificationSettings,
    pub log: LogSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind (default: 0.0.0.0)
    pub bind_addr: String,

    /// HTTP port (default: 8080)
    pub port: u16,
}

/// SQLite pool settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database file path, or `:memory:`
    pub path: PathBuf,

    pub max_connections: u32,

    pub min_connections: u32,

    /// Pool acquire timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Registration email settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// Send real email. When false, registrations are only logged.
    pub enabled: bool,

    pub smtp_host: String,

    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_username: Option<String>,

    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Sender mailbox, e.g. `PetVax <no-reply@petvax.local>`
    pub from_address: String,

    /// Upgrade the connection with STARTTLS
    pub starttls: bool,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from(Some(Path::new(&path))),
            Err(_) => Self::load_from(None),
        }
    }

    /// Load configuration using `file` as the config file.
    ///
    /// An explicit file must exist; without one, `petvax.toml` is read if
    /// present.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("server.bind_addr", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("database.path", "petvax.db")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("database.min_connections", 1_i64)?
            .set_default("database.connect_timeout_secs", 30_i64)?
            .set_default("notification.enabled", false)?
            .set_default("notification.smtp_host", "localhost")?
            .set_default("notification.smtp_port", 587_i64)?
            .set_default("notification.from_address", "no-reply@petvax.local")?
            .set_default("notification.starttls", true)?
            .set_default("log.filter", "info")?
            .set_default("log.json", false)?;

        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config: AppConfig = builder
            .add_source(
                Environment::with_prefix("PETVAX")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port",
                reason: "must be non-zero".to_string(),
            });
        }

        if self.database.min_connections < 1 {
            return Err(ConfigError::InvalidValue {
                key: "database.min_connections",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections",
                reason: format!(
                    "must be at least database.min_connections ({})",
                    self.database.min_connections
                ),
            });
        }

        if self.notification.enabled {
            self.notification.from_mailbox()?;
        }

        Ok(())
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }

    /// Pool settings for [`petvax_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        let base = if self.database.path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database.path)
                .max_connections(self.database.max_connections)
                .min_connections(self.database.min_connections)
        };
        base.connect_timeout(Duration::from_secs(self.database.connect_timeout_secs))
    }
}

impl NotificationSettings {
    /// Parses `from_address` as a mailbox.
    pub fn from_mailbox(&self) -> Result<Mailbox, ConfigError> {
        self.from_address
            .parse()
            .map_err(|e: lettre::address::AddressError| ConfigError::InvalidValue {
                key: "notification.from_address",
                reason: e.to_string(),
            })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
