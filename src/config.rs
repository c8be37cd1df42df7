//! Service settings
//!
//! Resolution order: built-in defaults, then `<config dir>/namematch/config.json`,
//! then environment variables. CLI flags are applied last by the caller.

use crate::auth::password::DEFAULT_HASH_COST;
use crate::matching::{Algorithm, DEFAULT_THRESHOLD};
use anyhow::{bail, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "namematch";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub bind: String,
    /// HS256 signing secret; a random one is generated when absent
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
    /// bcrypt work factor for newly hashed passwords
    pub password_hash_cost: u32,
    pub default_algorithm: Algorithm,
    pub default_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind: "127.0.0.1:5000".to_string(),
            jwt_secret: None,
            token_ttl_hours: 24,
            password_hash_cost: DEFAULT_HASH_COST,
            default_algorithm: Algorithm::Combined,
            default_threshold: DEFAULT_THRESHOLD,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Get the path to the settings file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join(APP_DIR).join("config.json"))
}

impl Settings {
    /// Load settings from the default config file and the process environment
    pub fn load() -> Result<Self> {
        let mut settings = match config_path() {
            Ok(path) => Self::from_file(&path)?,
            Err(e) => {
                warn!("{}; using default settings", e);
                Self::default()
            }
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Read a settings file; a missing file yields defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = lookup("NAMEMATCH_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(bind) = lookup("NAMEMATCH_BIND") {
            self.bind = bind;
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
            let host = self.bind.rsplit_once(':').map(|(h, _)| h).unwrap_or("127.0.0.1");
            self.bind = format!("{}:{}", host, port);
        }

        if let Some(secret) = lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            self.jwt_secret = Some(secret);
        }

        if let Some(ttl) = lookup("NAMEMATCH_TOKEN_TTL_HOURS") {
            self.token_ttl_hours = ttl
                .parse()
                .with_context(|| format!("Invalid NAMEMATCH_TOKEN_TTL_HOURS value: {}", ttl))?;
            self.token_ttl()
                .with_context(|| format!("Invalid NAMEMATCH_TOKEN_TTL_HOURS value: {}", ttl))?;
        }

        self.validate()
    }

    /// Session token lifetime
    pub fn token_ttl(&self) -> Result<Duration> {
        if self.token_ttl_hours <= 0 {
            bail!("token lifetime must be positive, got {} hours", self.token_ttl_hours);
        }
        Duration::try_hours(self.token_ttl_hours)
            .with_context(|| format!("token lifetime of {} hours is out of range", self.token_ttl_hours))
    }

    /// Reject values that would only fail later, at first use
    pub fn validate(&self) -> Result<()> {
        self.token_ttl().context("Invalid token_ttl_hours")?;
        if !(4..=31).contains(&self.password_hash_cost) {
            bail!(
                "Invalid password_hash_cost {}: bcrypt accepts 4 to 31",
                self.password_hash_cost
            );
        }
        Ok(())
    }
}
