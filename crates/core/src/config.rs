//! Application configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::registry::DEFAULT_UPCOMING_WINDOW_DAYS;

/// Directory under the user's config dir holding our files.
pub const CONFIG_DIR: &str = "rental-desk";
const CONFIG_FILE: &str = "config.toml";
const FLEET_FILE: &str = "fleet.json";

/// Runtime settings, read from `config.toml` and `RENTAL_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seed fleet loaded at startup.
    pub fleet_path: PathBuf,
    /// Days ahead, exclusive, listed as upcoming rentals.
    pub upcoming_window_days: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fleet_path: config_root().join(FLEET_FILE),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }
}

impl AppConfig {
    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from `path` (optional on disk), with environment overrides on top.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = AppConfig::default();
        let settings = Config::builder()
            .set_default("fleet_path", defaults.fleet_path.to_string_lossy().to_string())?
            .set_default("upcoming_window_days", defaults.upcoming_window_days as i64)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("RENTAL"))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

/// `~/.config/rental-desk`, or the working directory when no config dir exists.
pub fn config_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
}

/// Location of the main config file.
pub fn default_config_path() -> PathBuf {
    config_root().join(CONFIG_FILE)
}

/// Write a default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    ensure_config_at(default_config_path())
}

/// Write a default config to `path` unless the file is already there.
pub fn ensure_config_at(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let contents = render_config(&AppConfig::default());
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn render_config(config: &AppConfig) -> String {
    format!(
        "# Seed fleet (cars and bookings) loaded at startup.\nfleet_path = {}\n\n# Days ahead listed by `upcoming`.\nupcoming_window_days = {}\n",
        toml_string(&config.fleet_path.to_string_lossy()),
        config.upcoming_window_days
    )
}

/// Quote `value` as a TOML basic string.
fn toml_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04X}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.upcoming_window_days, DEFAULT_UPCOMING_WINDOW_DAYS);
        assert!(config.fleet_path.ends_with(FLEET_FILE));
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "fleet_path = \"/srv/rental/fleet.json\"\nupcoming_window_days = 3\n",
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.fleet_path, PathBuf::from("/srv/rental/fleet.json"));
        assert_eq!(config.upcoming_window_days, 3);
        Ok(())
    }

    #[test]
    fn default_config_is_written_once_and_loadable() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("config.toml");

        ensure_config_at(&path)?;
        assert!(path.exists());
        let written = AppConfig::load_from(&path)?;
        assert_eq!(written, AppConfig::default());

        fs::write(&path, "upcoming_window_days = 5\n")?;
        ensure_config_at(&path)?;
        assert_eq!(AppConfig::load_from(&path)?.upcoming_window_days, 5);
        Ok(())
    }

    #[test]
    fn unusual_fleet_paths_survive_a_reload() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        let config = AppConfig {
            fleet_path: PathBuf::from("/srv/flåde \"main\"/back\\slash/fleet.json"),
            upcoming_window_days: 4,
        };

        fs::write(&path, render_config(&config))?;
        assert_eq!(AppConfig::load_from(&path)?, config);
        Ok(())
    }
}
