//! # configs
//!
//! Layered runtime configuration for MAZADNET:
//!
//! 1. built-in defaults (`Settings::default()`)
//! 2. optional `config/mazadnet.toml` (or the file named by `MAZADNET_CONFIG`)
//! 3. environment variables prefixed `MAZADNET__`, e.g. `MAZADNET__SERVER__PORT=9000`
//!
//! A `.env` file in the working directory is loaded before step 3.

use chrono::format::{Item, StrftimeItems};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "config/mazadnet";
const ENV_PREFIX: &str = "MAZADNET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub feed: FeedConfig,
    pub messaging: MessagingConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Site owner; holds every moderation and admin permission.
    pub admin_user_id: String,
    /// Actor used by the HTTP API when a request names none. Defaults to
    /// the admin, so header-less requests carry every permission; point it
    /// at an ordinary user wherever the API is reachable by others.
    pub default_actor: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            admin_user_id: "currentUser".into(),
            default_actor: "currentUser".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// Category whose posts may carry an auction block.
    pub auction_category: String,
    /// Category of the home timeline; uncategorised posts also show there.
    pub home_category: String,
    pub max_post_length: usize,
    /// Reject replies to unknown parents instead of posting them top-level.
    pub strict_reply_parent: bool,
    /// Delete a post's whole reply subtree along with it.
    pub cascade_reply_deletes: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            auction_category: "Auctions".into(),
            home_category: "General".into(),
            max_post_length: 1000,
            strict_reply_parent: false,
            cascade_reply_deletes: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MessagingConfig {
    /// chrono format string for message display timestamps.
    pub timestamp_format: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            timestamp_format: "%H:%M".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug".into(),
            json: false,
        }
    }
}

impl Settings {
    /// Loads `.env`, the optional config file, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
        }

        let file = std::env::var("MAZADNET_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        let config = Config::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(config)
    }

    /// Parses settings from TOML text alone, defaults filling the gaps.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.site.admin_user_id.trim().is_empty() {
            return Err(ConfigError::Invalid("site.admin_user_id must not be empty".into()));
        }
        if self.feed.max_post_length == 0 {
            return Err(ConfigError::Invalid("feed.max_post_length must be positive".into()));
        }
        if self.feed.auction_category.trim().is_empty() {
            return Err(ConfigError::Invalid("feed.auction_category must not be empty".into()));
        }
        let format = &self.messaging.timestamp_format;
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "messaging.timestamp_format {format:?} is not a valid strftime format"
            )));
        }
        Ok(())
    }
}
