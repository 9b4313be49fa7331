use profile_editor::STORAGE_KEY;
use profile_workspace::{ExportOptions, FileStorage, DEFAULT_FILENAME, DEFAULT_SETTLE_DELAY_MS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "profile.config.json";

/// Profile configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the stored profile record
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Record key (also the file name, without `.json`)
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub export: ExportConfig,
}

fn default_storage_dir() -> String {
    ".profile".to_string()
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    #[serde(default = "default_filename")]
    pub filename: String,

    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Chromium binary; searched on PATH when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chromium_path: Option<String>,

    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

fn default_out_dir() -> String {
    ".".to_string()
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
            out_dir: default_out_dir(),
            chromium_path: None,
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the storage directory
    pub fn get_storage_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.storage_dir)
    }

    pub fn storage(&self, cwd: &str) -> anyhow::Result<FileStorage> {
        Ok(FileStorage::new(
            self.get_storage_dir(cwd),
            self.storage_key.clone(),
        )?)
    }

    pub fn export_options(&self, cwd: &str) -> ExportOptions {
        ExportOptions {
            filename: self.export.filename.clone(),
            out_dir: PathBuf::from(cwd).join(&self.export.out_dir),
            settle_delay: Duration::from_millis(self.export.settle_delay_ms),
            ..ExportOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            storage_key: default_storage_key(),
            export: ExportConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storageDir": "data",
            "storageKey": "profile_staging",
            "export": { "outDir": "dist", "chromiumPath": "/usr/bin/chromium" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.storage_dir, "data");
        assert_eq!(config.storage_key, "profile_staging");
        assert_eq!(config.export.out_dir, "dist");
        assert_eq!(config.export.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        // Missing export fields keep their defaults
        assert_eq!(config.export.filename, "Tivro_Full_Profile_2025.pdf");
        assert_eq!(config.export.settle_delay_ms, 600);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_dir, ".profile");
        assert_eq!(config.storage_key, "tivro_profile_production_v3");
        assert!(config.export.chromium_path.is_none());

        let options = config.export_options("/work");
        assert_eq!(
            options.output_path(),
            PathBuf::from("/work/./Tivro_Full_Profile_2025.pdf")
        );
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.storage_key, STORAGE_KEY);
        assert_eq!(config.export.out_dir, ".");
    }
}
