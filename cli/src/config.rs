use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Path to the notes database
    pub database: PathBuf,
    /// Autosave quiet period in milliseconds
    pub autosave_quiet_ms: u64,
    /// Palette color new notes get when none is given
    pub default_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("notora.db"),
            autosave_quiet_ms: 600,
            default_color: "white".to_string(),
        }
    }
}

/// Load the config file, writing out the defaults on first run.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        let config = Config::default();
        let toml = toml::to_string(&config)?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_writes_defaults_on_first_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notora.toml");

        let config = load_config(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.autosave_quiet_ms, 600);

        // Second load reads the written file back
        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded.default_color, config.default_color);
    }
}
