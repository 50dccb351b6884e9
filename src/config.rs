use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toolify::directory::DirectoryOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub backend: BackendConfig,
    pub directory: DirectoryConfig,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub load_delay_ms: u64,
    pub submit_delay_ms: u64,
    pub catalog_path: Option<PathBuf>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: 1000,
            submit_delay_ms: 2000,
            catalog_path: None,
        }
    }
}

impl BackendConfig {
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub category_filter: bool,
    pub allow_delete: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            category_filter: true,
            allow_delete: true,
        }
    }
}

impl DirectoryConfig {
    pub fn options(&self) -> DirectoryOptions {
        DirectoryOptions {
            category_filter: self.category_filter,
            allow_delete: self.allow_delete,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub tick_rate_ms: u64,
    pub toast_ttl_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            toast_ttl_ms: 4000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            backend: BackendConfig::default(),
            directory: DirectoryConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.load_delay(), Duration::from_millis(1000));
        assert_eq!(config.backend.submit_delay(), Duration::from_millis(2000));
        assert!(config.backend.catalog_path.is_none());
        assert!(config.directory.category_filter);
        assert_eq!(config.tui.tick_rate_ms, 250);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "backend:\n  load_delay_ms: 0\ndirectory:\n  allow_delete: false").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.backend.load_delay_ms, 0);
        assert_eq!(config.backend.submit_delay_ms, 2000);
        assert!(!config.directory.allow_delete);
        assert!(config.directory.category_filter);
        assert_eq!(config.tui.toast_ttl_ms, 4000);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let path = PathBuf::from("/nonexistent/toolify.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_directory_options() {
        let config = DirectoryConfig {
            category_filter: false,
            allow_delete: true,
        };
        let options = config.options();
        assert!(!options.category_filter);
        assert!(options.allow_delete);
    }
}
