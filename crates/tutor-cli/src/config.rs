//! Project configuration loaded from `.tutor/config.json`.
//!
//! Every field has a default, so a missing file or a partial file both
//! work. `tutor init` writes the defaults out for editing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tutor_core::MAX_BUILD_ROUNDS;

/// Directory holding configuration and the relation store.
pub const TUTOR_DIR: &str = ".tutor";
const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TutorConfig {
    pub version: String,
    /// Store directory, relative to `.tutor/`.
    pub store: PathBuf,
    /// Port `tutor serve` listens on.
    pub port: u16,
    /// Learner used when `--user` is not given.
    pub default_user: String,
    /// Builder round cap.
    pub max_rounds: usize,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            store: PathBuf::from("store"),
            port: 7432,
            default_user: "anonymous".to_string(),
            max_rounds: MAX_BUILD_ROUNDS,
        }
    }
}

impl TutorConfig {
    /// Loads the config under `root`, or defaults if there is none.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Writes the config under `root`, creating `.tutor/` if needed.
    pub fn save(&self, root: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(root.join(TUTOR_DIR))?;
        fs::write(config_path(root), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Absolute location of the relation store.
    pub fn store_path(&self, root: &Path) -> PathBuf {
        root.join(TUTOR_DIR).join(&self.store)
    }
}

fn config_path(root: &Path) -> PathBuf {
    root.join(TUTOR_DIR).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = TutorConfig::load(dir.path()).unwrap();
        assert_eq!(config, TutorConfig::default());
        assert_eq!(config.max_rounds, 20);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let config = TutorConfig {
            port: 9000,
            default_user: "alice".to_string(),
            ..TutorConfig::default()
        };
        config.save(dir.path()).unwrap();

        let loaded = TutorConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.store_path(dir.path()),
            dir.path().join(".tutor").join("store")
        );
    }

    #[test]
    fn test_partial_config() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(TUTOR_DIR)).unwrap();
        fs::write(config_path(dir.path()), r#"{"port": 8000}"#).unwrap();

        let config = TutorConfig::load(dir.path()).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.default_user, "anonymous");
    }
}
