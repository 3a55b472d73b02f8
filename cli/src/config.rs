// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use hostsync_core::{APP_NAME, Config as CoreConfig};

const HOSTSYNC_CONFIG_ENV: &str = "HOSTSYNC_CONFIG";

/// Loads and normalizes the configuration.
///
/// The file is taken from `path`, then `HOSTSYNC_CONFIG`, then the user
/// config directory. Only a missing default file falls back to defaults.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let path = if let Some(path) = path {
        Some(path)
    } else if let Ok(env_path) = std::env::var(HOSTSYNC_CONFIG_ENV) {
        Some(PathBuf::from(env_path))
    } else {
        let config = get_config_dir()?.join(APP_NAME).join("config.toml");
        if config.exists() {
            Some(config)
        } else {
            tracing::info!(path = %config.display(), "no config file, using defaults");
            None
        }
    };

    let mut config = match path {
        Some(path) => {
            fs::read_to_string(&path)
                .await
                .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
                .parse::<ConfigRaw>()?
                .core
        }
        None => CoreConfig::default(),
    };
    config.normalize()?;
    Ok(config)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}
