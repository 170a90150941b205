//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::records::RecordSource;
use crate::navigation::input::InputThresholds;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds new navigation requests are ignored after a transition
    pub cooldown_ms: u64,

    /// Viewport width at which wheel navigation replaces swipes
    pub desktop_min_width: u32,

    /// Minimum vertical travel for a swipe
    pub swipe_min_distance: f32,

    /// Path or URL of the family records document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_source: Option<String>,

    /// Override the flows' mobile-only setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_only: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cooldown_ms: 800,
            desktop_min_width: 768,
            swipe_min_distance: 50.0,
            records_source: None,
            mobile_only: None,
        }
    }
}

impl Config {
    /// File name of the records document when none is configured
    const DEFAULT_RECORDS_FILE: &'static str = "cye-wedding-families.json";

    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "invitacion")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "invitacion")
            .context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn input_thresholds(&self) -> InputThresholds {
        InputThresholds {
            desktop_min_width: self.desktop_min_width,
            swipe_min_distance: self.swipe_min_distance,
        }
    }

    /// Where to load family records from
    ///
    /// Falls back to the records file in the data directory.
    pub fn records_source(&self) -> Result<RecordSource> {
        match &self.records_source {
            Some(source) => {
                Ok(source.parse::<RecordSource>().unwrap_or_else(|never| match never {}))
            }
            None => Ok(RecordSource::File(Self::data_dir()?.join(Self::DEFAULT_RECORDS_FILE))),
        }
    }

    /// Effective mobile-only setting for a flow
    pub fn mobile_only(&self, flow_default: bool) -> bool {
        self.mobile_only.unwrap_or(flow_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_navigation_defaults() {
        let config = Config::default();
        assert_eq!(config.cooldown(), Duration::from_millis(800));
        assert_eq!(config.input_thresholds().desktop_min_width, 768);
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("cooldown_ms"));
        assert!(!json.contains("records_source"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"cooldown_ms":500,"records_source":"https://example.com/f.json"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.cooldown_ms, 500);
        assert_eq!(config.swipe_min_distance, 50.0);
        assert_eq!(
            config.records_source().unwrap(),
            RecordSource::Url("https://example.com/f.json".into())
        );
    }

    #[test]
    fn mobile_only_override() {
        let config = Config { mobile_only: Some(false), ..Default::default() };
        assert!(!config.mobile_only(true));
        assert!(Config::default().mobile_only(true));
    }
}
