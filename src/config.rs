//! Configuration persistence for inpaint-mask settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Smallest brush width accepted by the surface
pub const MIN_BRUSH_SIZE: u32 = 1;
/// Largest brush width accepted by the surface
pub const MAX_BRUSH_SIZE: u32 = 100;
/// Amount the brush grows or shrinks per step control
pub const BRUSH_STEP: u32 = 5;

/// Serializable color representation for brushes and backgrounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for BrushColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl BrushColor {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const ORANGE: Self = Self::rgb(1.0, 165.0 / 255.0, 0.0);

    /// Preset colors offered by the brush controls
    pub const PALETTE: [Self; 7] = [
        Self::WHITE,
        Self::RED,
        Self::BLUE,
        Self::GREEN,
        Self::YELLOW,
        Self::BLACK,
        Self::ORANGE,
    ];

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a color name (`white`, `red`, ...) or a `#rgb` / `#rrggbb` hex string
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::from_hex(hex);
        }

        match value.to_ascii_lowercase().as_str() {
            "white" => Some(Self::WHITE),
            "black" => Some(Self::BLACK),
            "red" => Some(Self::RED),
            "green" | "lime" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            "yellow" => Some(Self::YELLOW),
            "orange" => Some(Self::ORANGE),
            _ => None,
        }
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        let (r, g, b) = match hex.len() {
            3 => {
                // #abc expands to #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                (r * 17, g * 17, b * 17)
            }
            6 => (
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ),
            _ => return None,
        };
        Some(Self::from_rgb_u8(r, g, b))
    }

    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

/// Clamp a requested brush width into the supported range
pub fn clamp_brush_size(size: i64) -> u32 {
    size.clamp(MIN_BRUSH_SIZE as i64, MAX_BRUSH_SIZE as i64) as u32
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskConfig {
    /// Width of the interactive drawing surface in surface pixels
    pub surface_width: u32,
    /// Height of the interactive drawing surface in surface pixels
    pub surface_height: u32,
    /// Total inset subtracted from each surface dimension before fitting the image
    pub fit_padding: f32,
    /// Letterbox color shown around the fitted image
    pub background: BrushColor,
    /// Initial brush width (1-100)
    pub brush_size: u32,
    /// Initial brush color
    pub brush_color: BrushColor,
    /// Opacity of the black overlay laid over the original in the mask (0.0-1.0)
    pub overlay_alpha: f32,
    /// Maximum number of undo snapshots kept per image
    pub history_limit: usize,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            surface_width: 600,
            surface_height: 400,
            fit_padding: 0.0,
            // gray-100
            background: BrushColor::from_rgb_u8(0xf3, 0xf4, 0xf6),
            brush_size: 20,
            brush_color: BrushColor::WHITE,
            overlay_alpha: 0.5,
            history_limit: 100,
        }
    }
}

impl MaskConfig {
    /// Directory name under the user config dir
    pub const ID: &'static str = "inpaint-mask";

    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load and sanitize configuration from a JSON file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Write configuration as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Bring every field back into its valid range
    pub fn sanitized(mut self) -> Self {
        self.surface_width = self.surface_width.max(1);
        self.surface_height = self.surface_height.max(1);
        let max_padding = (self.surface_width.min(self.surface_height) - 1) as f32;
        if !self.fit_padding.is_finite() {
            self.fit_padding = 0.0;
        }
        self.fit_padding = self.fit_padding.clamp(0.0, max_padding);
        self.brush_size = clamp_brush_size(self.brush_size as i64);
        if !self.overlay_alpha.is_finite() {
            self.overlay_alpha = 0.5;
        }
        self.overlay_alpha = self.overlay_alpha.clamp(0.0, 1.0);
        // Baseline plus at least one edit
        self.history_limit = self.history_limit.max(2);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(BrushColor::parse("white"), Some(BrushColor::WHITE));
        assert_eq!(BrushColor::parse(" Red "), Some(BrushColor::RED));
        assert_eq!(BrushColor::parse("mauve"), None);
    }

    #[test]
    fn test_palette_entries_parse_by_name() {
        let names = ["white", "red", "blue", "green", "yellow", "black", "orange"];
        assert_eq!(names.len(), BrushColor::PALETTE.len());
        for (name, color) in names.iter().zip(BrushColor::PALETTE) {
            assert_eq!(BrushColor::parse(name), Some(color), "{}", name);
        }
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(BrushColor::parse("#ffffff"), Some(BrushColor::WHITE));
        assert_eq!(BrushColor::parse("#FF0000"), Some(BrushColor::RED));
        assert_eq!(BrushColor::parse("#00f"), Some(BrushColor::BLUE));
        assert_eq!(
            BrushColor::parse("#FFA500").map(BrushColor::to_rgba_u8),
            Some([255, 165, 0, 255])
        );
        assert_eq!(BrushColor::parse("#12345"), None);
        assert_eq!(BrushColor::parse("#gggggg"), None);
    }

    #[test]
    fn test_clamp_brush_size() {
        assert_eq!(clamp_brush_size(0), 1);
        assert_eq!(clamp_brush_size(-40), 1);
        assert_eq!(clamp_brush_size(40), 40);
        assert_eq!(clamp_brush_size(250), 100);
    }

    #[test]
    fn test_sanitized_clamps_fields() {
        let config = MaskConfig {
            surface_width: 0,
            surface_height: 400,
            fit_padding: 50.0,
            brush_size: 500,
            overlay_alpha: 3.0,
            history_limit: 0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(config.surface_width, 1);
        assert_eq!(config.fit_padding, 0.0);
        assert_eq!(config.brush_size, MAX_BRUSH_SIZE);
        assert_eq!(config.overlay_alpha, 1.0);
        assert_eq!(config.history_limit, 2);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = MaskConfig {
            surface_width: 800,
            brush_color: BrushColor::ORANGE,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = MaskConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "brush_size": 35 }"#).unwrap();

        let loaded = MaskConfig::load_from(&path).unwrap();
        assert_eq!(loaded.brush_size, 35);
        assert_eq!(loaded.surface_width, 600);
        assert_eq!(loaded.overlay_alpha, 0.5);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(MaskConfig::load_from(&path).is_err());
    }
}
