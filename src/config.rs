// ABOUTME: Configuration module for the carousel-slides application
// ABOUTME: Provides configuration settings, dimension presets and environment variable handling

use crate::render::CaptureConfig;
use std::env;
use std::path::PathBuf;

/// Slide dimension presets matching common carousel formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionPreset {
    /// 1:1, 1080x1080
    Square,
    /// 4:5, 1080x1350
    Portrait,
    /// 16:9, 1080x608
    Landscape,
}

impl DimensionPreset {
    /// Pixel dimensions (width, height) at 1x scale
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            DimensionPreset::Square => (1080, 1080),
            DimensionPreset::Portrait => (1080, 1350),
            DimensionPreset::Landscape => (1080, 608),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DimensionPreset::Square => "Square (1:1)",
            DimensionPreset::Portrait => "Portrait (4:5)",
            DimensionPreset::Landscape => "Landscape (16:9)",
        }
    }
}

/// Export quality scale factors: 1x (standard), 2x (high), 3x (ultra)
pub const EXPORT_SCALES: [u32; 3] = [1, 2, 3];

/// Global configuration for the application
pub struct Config {
    pub browser_path: Option<String>,
    pub storage_path: PathBuf,
    pub default_timeout_ms: u64,
    pub embed_resources: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_path: env::var("BROWSER_PATH").ok(),
            storage_path: PathBuf::from("carousel-documents.json"),
            default_timeout_ms: 30000, // 30 seconds
            embed_resources: true,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let browser_path = env::var("BROWSER_PATH").ok();
        let storage_path = env::var("CAROUSEL_STORAGE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("carousel-documents.json"));
        let default_timeout_ms = env::var("DEFAULT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30000);
        let embed_resources = env::var("EMBED_RESOURCES")
            .ok()
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            browser_path,
            storage_path,
            default_timeout_ms,
            embed_resources,
        }
    }

    /// Get a capture configuration with defaults from this config
    pub fn get_capture_config(
        &self,
        preset: Option<DimensionPreset>,
        scale: Option<u32>,
        timeout_ms: Option<u64>,
    ) -> CaptureConfig {
        let (width, height) = preset.unwrap_or(DimensionPreset::Square).dimensions();
        CaptureConfig {
            width,
            height,
            scale: scale.unwrap_or(1),
            timeout_ms: timeout_ms.unwrap_or(self.default_timeout_ms),
            browser_path: self.browser_path.clone(),
        }
    }
}
