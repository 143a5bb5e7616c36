use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Server configuration stored locally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server_url: String,
    pub page_size: u32,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000/api".to_string(),
            page_size: crate::feed::DEFAULT_PAGE_SIZE,
            last_updated: chrono::Utc::now(),
        }
    }
}

/// Configuration manager for the .inspira directory
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).context("Failed to create .inspira directory")?;
        }

        Ok(Self { config_dir })
    }

    /// Manager rooted at an explicit directory (used by tests).
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    fn get_config_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home_dir.join(".inspira"))
    }

    fn get_server_config_file(&self) -> PathBuf {
        self.config_dir.join("server_config.json")
    }

    /// Save server configuration
    pub fn save_server_config(&self, config: &ServerConfig) -> Result<()> {
        fs::create_dir_all(&self.config_dir).context("Failed to create .inspira directory")?;
        let json =
            serde_json::to_string_pretty(config).context("Failed to serialize server config")?;

        fs::write(self.get_server_config_file(), json)
            .context("Failed to write server config file")?;

        Ok(())
    }

    /// Load server configuration. A missing or unparseable file yields `None`
    /// so the caller falls back to the defaults.
    pub fn load_server_config(&self) -> Result<Option<ServerConfig>> {
        let config_file = self.get_server_config_file();

        if !config_file.exists() {
            return Ok(None);
        }

        let json =
            fs::read_to_string(&config_file).context("Failed to read server config file")?;

        match serde_json::from_str(&json) {
            Ok(config) => Ok(Some(config)),
            Err(e) => {
                log::warn!("Ignoring unparseable server config: {e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_server_config() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp.path().to_path_buf());

        let config = ServerConfig {
            server_url: "https://inspira.example/api".to_string(),
            page_size: 25,
            last_updated: chrono::Utc::now(),
        };
        manager.save_server_config(&config).unwrap();

        let loaded = manager.load_server_config().unwrap().unwrap();
        assert_eq!(loaded.server_url, "https://inspira.example/api");
        assert_eq!(loaded.page_size, 25);
    }

    #[test]
    fn missing_config_yields_none() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp.path().to_path_buf());
        assert!(manager.load_server_config().unwrap().is_none());
    }

    #[test]
    fn corrupt_config_yields_none() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp.path().to_path_buf());

        fs::write(temp.path().join("server_config.json"), "{not json").unwrap();
        assert!(manager.load_server_config().unwrap().is_none());
    }
}
