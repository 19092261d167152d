//! Application settings management
//!
//! Settings persistence, loading, and updating for the resume studio.
//! A file that is missing or fails to parse yields defaults; saving is
//! always explicit.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// General application settings
    pub general: GeneralSettings,
    /// Export pipeline settings
    pub export: ExportSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    /// UI language code (e.g., "en", "es", "fr")
    pub language: String,
    /// Template selected for new documents
    pub default_template: String,
    /// Directory snapshots are written to
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            default_template: "modern".to_string(),
            snapshot_dir: None,
        }
    }
}

/// Export pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    /// Resolution multiplier applied at rasterization
    pub supersampling: f32,
    /// Whether PDF streams are flate-compressed
    pub compress: bool,
    /// JPEG quality for page images (0-100)
    pub jpeg_quality: u8,
    /// Directory exported PDFs are written to
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            supersampling: 2.0,
            compress: true,
            jpeg_quality: 90,
            output_dir: None,
        }
    }
}

/// Settings manager for loading, saving, and updating application settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: AppSettings,
}

impl SettingsManager {
    /// Create a new settings manager rooted at the given app data directory
    pub fn new(app_data_dir: PathBuf) -> Self {
        let settings_path = app_data_dir.join("settings.json");
        Self {
            settings_path,
            current: AppSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    pub fn current(&self) -> &AppSettings {
        &self.current
    }

    /// Load settings from disk, or return defaults if the file is missing
    /// or unreadable
    pub async fn load(&mut self) -> Result<&AppSettings> {
        if self.settings_path.exists() {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            match serde_json::from_str::<AppSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!("failed to parse settings file, using defaults: {}", e);
                    self.current = AppSettings::default();
                }
            }
        }
        Ok(&self.current)
    }

    /// Persist the current settings
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, json).await?;
        Ok(())
    }

    /// Apply an update to the cached settings (callers save explicitly)
    pub fn update(&mut self, settings: AppSettings) {
        self.current = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = SettingsManager::new(dir.path().to_path_buf());

        let settings = manager.load().await.unwrap();
        assert_eq!(settings, &AppSettings::default());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = SettingsManager::new(dir.path().to_path_buf());

        let mut settings = AppSettings::default();
        settings.export.supersampling = 3.0;
        manager.update(settings.clone());
        manager.save().await.unwrap();

        let mut reload = SettingsManager::new(dir.path().to_path_buf());
        assert_eq!(reload.load().await.unwrap(), &settings);
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = SettingsManager::new(dir.path().to_path_buf());
        tokio::fs::write(manager.settings_path(), "{not json")
            .await
            .unwrap();

        let settings = manager.load().await.unwrap();
        assert_eq!(settings, &AppSettings::default());
    }
}
