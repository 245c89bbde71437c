//! Preference persistence
//!
//! Loads and saves small TOML preference files under the platform config
//! directory. Only user preferences go through here; wheel entries live for
//! a single session and are never written to disk.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error while reading/writing config
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Base configuration directory shared by every roulette front end
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "song-roulette", "roulette")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Configuration file path for a named front end
pub fn config_path(app_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", app_name)))
}

/// Load configuration for a named front end
///
/// Returns `None` if the config file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config<T: DeserializeOwned>(app_name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;
    load_config_from(&path)
}

/// Load configuration from an explicit path
pub fn load_config_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save configuration for a named front end
pub fn save_config<T: Serialize>(app_name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, config)
}

/// Save configuration to an explicit path, creating parent directories
pub fn save_config_to<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    log::debug!("Saved config to {}", path.display());
    Ok(())
}

/// Delete configuration for a named front end
pub fn delete_config(app_name: &str) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;
    delete_config_at(&path)
}

/// Delete configuration at an explicit path; a missing file is not an error
pub fn delete_config_at(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        fs::remove_file(path)?;
        log::debug!("Deleted config at {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestConfig {
        theme: String,
        spin_duration: f64,
        autoplay: bool,
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wheel_shared_config_{}_{}", name, std::process::id()))
            .join("prefs.toml")
    }

    #[test]
    fn test_config_path() {
        if let Some(path) = config_path("song_roulette") {
            assert!(path.to_string_lossy().contains("song_roulette.toml"));
        }
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = scratch_path("missing");
        let loaded: Option<TestConfig> = load_config_from(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("save_load");
        let config = TestConfig {
            theme: "arcade".to_string(),
            spin_duration: 4.5,
            autoplay: false,
        };
        save_config_to(&path, &config).unwrap();
        let loaded: Option<TestConfig> = load_config_from(&path).unwrap();
        assert_eq!(loaded, Some(config));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_delete_then_load_is_none() {
        let path = scratch_path("delete");
        let config = TestConfig {
            theme: "studio_light".to_string(),
            spin_duration: 2.0,
            autoplay: true,
        };
        save_config_to(&path, &config).unwrap();
        delete_config_at(&path).unwrap();
        let loaded: Option<TestConfig> = load_config_from(&path).unwrap();
        assert!(loaded.is_none());

        // Deleting again is fine
        delete_config_at(&path).unwrap();
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "theme = [unterminated").unwrap();
        let result: Result<Option<TestConfig>, _> = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
