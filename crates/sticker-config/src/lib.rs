use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sticker_core::Platform;

/// Configuration for the sticker catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub packets: PacketsConfig,

    #[serde(default)]
    pub syndication: SyndicationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Defaults to `catalog.db` in the platform data dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketsConfig {
    #[serde(default = "default_packet_size")]
    pub default_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyndicationConfig {
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
}

impl Default for PacketsConfig {
    fn default() -> Self {
        Self {
            default_size: default_packet_size(),
        }
    }
}

impl Default for SyndicationConfig {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
        }
    }
}

fn default_packet_size() -> u32 {
    1
}

fn default_platforms() -> Vec<Platform> {
    Platform::ALL.to_vec()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "stickers", "stickers") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.stickers/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.path.is_none());
        assert_eq!(config.packets.default_size, 1);
        assert_eq!(config.syndication.platforms, vec![Platform::Ios, Platform::Android]);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.packets.default_size, config.packets.default_size);
        assert_eq!(parsed.syndication.platforms, config.syndication.platforms);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[database]
path = "/tmp/stickers.db"

[syndication]
platforms = ["Android"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/stickers.db")));
        assert_eq!(config.packets.default_size, 1);
        assert_eq!(config.syndication.platforms, vec![Platform::Android]);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = std::env::temp_dir().join(format!("stickers-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = std::fs::remove_dir_all(&dir);

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.packets.default_size, 1);
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
