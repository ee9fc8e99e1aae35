//! Application configuration
//!
//! Loaded from a TOML file (default: `~/.config/texnouz-rental/config.toml`,
//! overridable via the `RENTAL_CONFIG` environment variable). Every section
//! and field has a sensible default, so a missing file or a partial file
//! still yields a runnable configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub pricing: PricingSection,
    pub holds: HoldsSection,
}

/// `[server]` — REST API bind address and shutdown behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host the REST API binds to
    pub host: String,
    /// Port the REST API binds to
    pub port: u16,
    /// Seconds to wait for in-flight work during graceful shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 10,
        }
    }
}

/// `[database]` — storage location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file path, used when `url` is not set
    pub path: String,
    /// Full connection URL; overrides `path` when present
    pub url: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "rental.db".to_string(),
            url: None,
        }
    }
}

impl DatabaseSection {
    /// The SeaORM connection URL for this section.
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

/// `[logging]` — tracing subscriber setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter directive (e.g. `info`, `texnouz_rental=debug`)
    pub level: String,
    /// Output format: `text` or `json`
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// `[pricing]` — rental pricing policy.
///
/// Amounts are in the smallest currency unit (tiyin for UZS).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingSection {
    /// Per-day surcharge for days beyond a car's base duration
    pub overage_rate: i64,
    /// ISO 4217 currency code
    pub currency: String,
}

impl Default for PricingSection {
    fn default() -> Self {
        Self {
            overage_rate: 20_000,
            currency: "UZS".to_string(),
        }
    }
}

/// `[holds]` — optional expiry of stale pending bookings.
///
/// Off by default: a pending booking holds its dates until staff decide
/// or the customer cancels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoldsSection {
    /// Enable the background sweep that archives stale pendings as `expired`
    pub expire_pending: bool,
    /// Age after which a pending booking is considered stale
    pub pending_ttl_hours: u64,
    /// Sweep interval in seconds
    pub check_interval_secs: u64,
}

impl Default for HoldsSection {
    fn default() -> Self {
        Self {
            expire_pending: false,
            pending_ttl_hours: 48,
            check_interval_secs: 300,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Bind address for the REST API.
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Errors raised while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Default config file location: `~/.config/texnouz-rental/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("texnouz-rental")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────
