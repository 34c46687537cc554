//! Engine configuration and serialization.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Optional calculator features.
    #[serde(default)]
    pub capabilities: EngineCapabilities,
    /// Values a new session starts from.
    #[serde(default)]
    pub defaults: SessionDefaults,
    /// Resolution that aspect presets reset to.
    #[serde(default)]
    pub preset_baseline: PresetBaseline,
}

impl EngineConfig {
    /// Load configuration. `.json` files are read as JSON, anything else as XML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        let config = if path.extension().map(|e| e == "json").unwrap_or(false) {
            serde_json::from_str(&contents).context("Invalid JSON config")?
        } else {
            quick_xml::de::from_str(&contents).context("Invalid XML config")?
        };

        log::info!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Save as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write config {:?}", path))?;
        log::info!("Saved engine config to {:?}", path);
        Ok(())
    }
}

/// Feature switches that distinguish calculator variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCapabilities {
    /// Screen gain can be edited. When off, gain stays at its default.
    pub has_screen_gain: bool,
    /// Aspect presets accept any `<w>:<h>` ratio, not just the standard table.
    pub has_custom_aspect_presets: bool,
}

impl Default for EngineCapabilities {
    fn default() -> Self {
        Self {
            has_screen_gain: true,
            has_custom_aspect_presets: true,
        }
    }
}

/// Session start values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDefaults {
    /// Surface width as typed.
    pub width: String,
    /// Surface height as typed.
    pub height: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub lock_width: bool,
    pub lock_height: bool,
    pub throw_ratio: f64,
    pub lumens: f64,
    pub screen_gain: f64,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            width: "16ft".to_string(),
            height: "9ft".to_string(),
            pixel_width: 1920,
            pixel_height: 1080,
            lock_width: false,
            lock_height: true,
            throw_ratio: 1.5,
            lumens: 0.0,
            screen_gain: 1.0,
        }
    }
}

/// Baseline resolution for aspect presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetBaseline {
    /// Pixel width when the preset derives height from width.
    pub pixel_width: u32,
    /// Pixel height when the preset derives width from height.
    pub pixel_height: u32,
}

impl Default for PresetBaseline {
    fn default() -> Self {
        Self {
            pixel_width: 1920,
            pixel_height: 1080,
        }
    }
}
