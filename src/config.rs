use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::selector::ReportMode;

/// Public historical automobile sales dataset (IBM Skills Network object storage).
pub const DEFAULT_DATA_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

pub const DEFAULT_CONFIG_PATH: &str = "dashboard.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Local file path or `http(s)://` URL of the dataset.
    pub data_source: String,
    pub window_title: String,
    /// Report label selected when the window opens.
    pub default_mode: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            window_title: "Automobile Sales Statistics Dashboard".to_string(),
            default_mode: ReportMode::Yearly.label().to_string(),
        }
    }
}

impl AppConfig {
    /// Read the config file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.initial_mode()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn initial_mode(&self) -> Result<ReportMode> {
        self.default_mode
            .parse::<ReportMode>()
            .context("invalid default_mode in config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config.data_source, DEFAULT_DATA_SOURCE);
        assert_eq!(config.initial_mode().unwrap(), ReportMode::Yearly);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(
            &path,
            r#"{"data_source": "data/sales.csv", "default_mode": "Recession Period Statistics"}"#,
        )
        .unwrap();

        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.data_source, "data/sales.csv");
        assert_eq!(config.window_title, "Automobile Sales Statistics Dashboard");
        assert_eq!(config.initial_mode().unwrap(), ReportMode::RecessionPeriod);
    }

    #[test]
    fn bad_mode_or_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dashboard.json");
        std::fs::write(&path, r#"{"default_mode": "Weekly"}"#).unwrap();
        assert!(AppConfig::load_or_default(&path).is_err());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::load_or_default(&path).is_err());
    }
}
