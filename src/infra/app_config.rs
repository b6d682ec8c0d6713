use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::application::Timezone;
use crate::infra::db::database::DEFAULT_DB_FILE;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Database file; relative paths resolve against the working directory.
    pub database_path: Option<PathBuf>,
    /// Clock used for "now" in date-relative queries.
    pub timezone: Timezone,
    /// env_logger filter used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load the config from its default location. A missing file yields defaults.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pick the database file: explicit flag, then `$FOODSHARE_DB_PATH`, then
/// the config file, then `food_sharing.db` in the working directory.
pub fn resolve_database_path(flag: Option<&Path>, config: &AppConfig) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("FOODSHARE_DB_PATH") {
        return PathBuf::from(path);
    }
    if let Some(path) = &config.database_path {
        return path.clone();
    }
    PathBuf::from(DEFAULT_DB_FILE)
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("FOODSHARE_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("FOODSHARE_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("Foodshare");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("Foodshare");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("foodshare");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("foodshare");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".foodshare")
}
