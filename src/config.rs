use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::picker::PickOptions;

/// Key under which the configuration is stored in eframe's persistent storage
pub const CONFIG_KEY: &str = "sticker_smash_config";

/// Settings of both export paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Height of the captured image on native, width follows the aspect ratio
    pub native_height: u32,
    /// 1.0 writes a lossless PNG, lower values a JPEG of that quality
    pub native_quality: f32,
    pub web_width: u32,
    pub web_height: u32,
    pub web_quality: f32,
    pub download_file_name: String,
    /// Overrides the `<Pictures>/StickerSmash` library directory
    pub library_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            native_height: 440,
            native_quality: 1.0,
            web_width: 320,
            web_height: 440,
            web_quality: 0.95,
            download_file_name: "sticker-smash.jpeg".to_owned(),
            library_dir: None,
        }
    }
}

impl ExportConfig {
    /// Directory the native export writes into
    pub fn resolve_library_dir(&self) -> PathBuf {
        if let Some(dir) = &self.library_dir {
            return dir.clone();
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(pictures) = dirs::picture_dir() {
                return pictures.join("StickerSmash");
            }
            if let Some(home) = dirs::home_dir() {
                return home.join("Pictures").join("StickerSmash");
            }
            return std::env::temp_dir().join("StickerSmash");
        }
        #[allow(unreachable_code)]
        PathBuf::from("StickerSmash")
    }
}

/// Application configuration, persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old config
pub struct AppConfig {
    pub picker: PickOptions,
    pub export: ExportConfig,
    /// Logical size of a sticker at scale 1
    pub sticker_size: f32,
    /// How long notices stay on screen
    pub notice_seconds: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            picker: PickOptions::default(),
            export: ExportConfig::default(),
            sticker_size: 40.0,
            notice_seconds: 3.0,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let export = &self.export;
        if export.native_height == 0 || export.web_width == 0 || export.web_height == 0 {
            return Err(ConfigError::Invalid("export dimensions must be positive".to_owned()));
        }
        for (name, quality) in [
            ("export.native_quality", export.native_quality),
            ("export.web_quality", export.web_quality),
            ("picker.quality", self.picker.quality),
        ] {
            if !(quality > 0.0 && quality <= 1.0) {
                return Err(ConfigError::Invalid(format!("{} must be in (0, 1], got {}", name, quality)));
            }
        }
        if export.download_file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("export.download_file_name is empty".to_owned()));
        }
        if self.sticker_size <= 0.0 {
            return Err(ConfigError::Invalid("sticker_size must be positive".to_owned()));
        }
        Ok(())
    }

    /// Loads the stored configuration, falling back to defaults when missing or invalid
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(storage) = storage else {
            return Self::default();
        };
        match eframe::get_value::<AppConfig>(storage, CONFIG_KEY) {
            Some(config) => match config.validate() {
                Ok(()) => config,
                Err(err) => {
                    log::warn!("Ignoring stored configuration: {}", err);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}
