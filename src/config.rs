//! Application configuration.
//!
//! Read from `anime_inventory.toml` in the working directory when present.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sqlite::SqliteConfig;

pub const CONFIG_FILE: &str = "anime_inventory.toml";
pub const DEFAULT_DB_PATH: &str = "anime_inventory.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// SQLite database file holding the `anime_purchases` table.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl InventoryConfig {
    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: InventoryConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn sqlite(&self) -> SqliteConfig {
        SqliteConfig::new(self.db_path.clone())
    }
}
