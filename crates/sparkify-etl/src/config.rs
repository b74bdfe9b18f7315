use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a sparkify load run.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SPARKIFY_* prefix)
/// 3. Config file (~/.config/sparkify/config.toml)
/// 4. Built-in defaults (lowest priority)
///
/// The defaults are relative paths, so a run with no config file and no
/// flags reads `data/song_data` and `data/log_data` under the working
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: SPARKIFY_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    pub database_path: PathBuf,

    /// Root of the song metadata files.
    pub song_data_dir: PathBuf,

    /// Root of the event log files.
    pub log_data_dir: PathBuf,

    /// Extension (without the dot) of the files to load.
    pub file_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            song_data_dir: PathBuf::from("data/song_data"),
            log_data_dir: PathBuf::from("data/log_data"),
            file_extension: "json".to_string(),
        }
    }
}

const DEFAULT_DATABASE_PATH: &str = "sparkifydb.sqlite";

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/sparkify/config.toml
    /// Reads environment variables with SPARKIFY_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("sparkify");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration, overriding the database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/sparkify/config.toml
/// - macOS: ~/Library/Application Support/sparkify/config.toml
/// - Windows: %APPDATA%\sparkify\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sparkify")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Sparkify Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SPARKIFY_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite database holding the star schema
#
# Can also be set via:
# - CLI: sparkify --db /custom/path.sqlite run
# - Environment: SPARKIFY_DATABASE_PATH=/custom/path.sqlite
#database_path = "sparkifydb.sqlite"

# Root directory of the song metadata files (one JSON object per file)
#song_data_dir = "data/song_data"

# Root directory of the event log files (one JSON object per line)
#log_data_dir = "data/log_data"

# Only files with this extension are loaded
#file_extension = "json"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database_path, PathBuf::from("sparkifydb.sqlite"));
        assert_eq!(config.song_data_dir, PathBuf::from("data/song_data"));
        assert_eq!(config.log_data_dir, PathBuf::from("data/log_data"));
        assert_eq!(config.file_extension, "json");
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/sparkify-test.sqlite");
        let config = Config::load_with_db_path(custom_path.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().database_path, custom_path);
    }

    #[test]
    fn test_example_config_mentions_every_key() {
        let example = example_config();
        for key in ["database_path", "song_data_dir", "log_data_dir", "file_extension"] {
            assert!(example.contains(key), "missing {key}");
        }
    }
}
