// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use std::time::Duration;

use jiff::tz::TimeZone;

/// The name of the hostsync application.
pub const APP_NAME: &str = "hostsync";

const DB_FILE: &str = "hostsync.db";

/// Configuration for the synchronization engine.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for storing application state.
    pub state_dir: Option<PathBuf>,

    /// Upper bound for a whole sync run, in seconds.
    pub sync_timeout_secs: u64,

    /// Upper bound for a single feed request, in seconds.
    pub fetch_timeout_secs: u64,

    /// How many times a transient fetch failure is retried.
    pub fetch_retries: u32,

    /// Base delay between fetch retries, in milliseconds. Grows linearly.
    pub retry_backoff_ms: u64,

    /// The `User-Agent` header sent with feed requests.
    pub user_agent: String,

    /// Local hour of the day at which checkout cleanings are requested.
    pub cleaning_hour: i8,

    /// IANA time zone used for cleaning schedules. Defaults to the system zone.
    pub timezone: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            sync_timeout_secs: 9,
            fetch_timeout_secs: 10,
            fetch_retries: 1,
            retry_backoff_ms: 500,
            user_agent: format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION")),
            cleaning_hour: 11,
            timezone: None,
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        // Normalize state directory
        match &self.state_dir {
            Some(a) => self.state_dir = Some(expand_path(a)?),
            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        }

        if !(0..=23).contains(&self.cleaning_hour) {
            return Err(ConfigError::CleaningHour(self.cleaning_hour));
        }
        if self.sync_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("sync_timeout_secs"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("fetch_timeout_secs"));
        }
        self.time_zone()?;
        Ok(())
    }

    /// Path of the database file, or `None` for an in-memory database.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.state_dir.as_ref().map(|dir| dir.join(DB_FILE))
    }

    /// Upper bound for a whole sync run.
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }

    /// Upper bound for a single feed request.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Base delay between fetch retries.
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Resolves the configured time zone.
    pub fn time_zone(&self) -> Result<TimeZone, ConfigError> {
        match &self.timezone {
            Some(name) => TimeZone::get(name).map_err(|source| ConfigError::TimeZone {
                name: name.clone(),
                source,
            }),
            None => Ok(TimeZone::system()),
        }
    }
}

/// Errors raised while loading or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A path could not be expanded.
    #[error("failed to expand path: {0}")]
    Path(String),

    /// The cleaning hour is outside `0..=23`.
    #[error("cleaning_hour must be between 0 and 23, got {0}")]
    CleaningHour(i8),

    /// A timeout was set to zero.
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    /// The configured time zone is unknown.
    #[error("unknown time zone {name:?}: {source}")]
    TimeZone {
        /// The configured name.
        name: String,
        /// The lookup failure.
        source: jiff::Error,
    },
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| ConfigError::Path(format!("invalid path encoding: {}", path.display())))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or_else(|| ConfigError::Path("user home directory not found".into()))
}

fn get_config_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| ConfigError::Path("user config directory not found".into()))
}

fn get_state_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| ConfigError::Path("user state directory not found".into()))
}
