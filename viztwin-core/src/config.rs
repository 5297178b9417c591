/// Viewer configuration with RON loading
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::color::{palette, Color};
use crate::error::{Result, VizTwinError};

/// Colors used for the viewer background
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background_start: Color,
    pub background_end: Color,
    pub grid: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_start: palette::DEEP_BLUE,
            background_end: palette::BRAND_BLUE,
            grid: palette::SKY,
        }
    }
}

/// Tunables for the dashboard viewer and the upload simulation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Degrees of rotation per pixel dragged
    pub drag_sensitivity: f64,
    pub grid_spacing: u32,
    pub upload_tick_ms: u64,
    pub upload_step: u8,
    pub theme: Theme,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 700,
            drag_sensitivity: 0.5,
            grid_spacing: 40,
            upload_tick_ms: 400,
            upload_step: 10,
            theme: Theme::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse a config from RON text. Missing fields keep their defaults.
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: ViewerConfig = ron::from_str(text).map_err(VizTwinError::config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&text)?;
        log::info!("loaded viewer config from {}", path.display());
        Ok(config)
    }

    pub fn upload_tick(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(VizTwinError::config("canvas dimensions must be non-zero"));
        }
        if self.grid_spacing == 0 {
            return Err(VizTwinError::config("grid_spacing must be non-zero"));
        }
        if self.upload_step == 0 || self.upload_step > 100 {
            return Err(VizTwinError::config("upload_step must be in 1..=100"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!((config.canvas_width, config.canvas_height), (1000, 700));
        assert_eq!(config.upload_tick(), Duration::from_millis(400));
        assert!((config.drag_sensitivity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_partial_ron() {
        let config = ViewerConfig::from_ron(
            r##"(canvas_width: 640, theme: (grid: "#ffffff"))"##,
        )
        .unwrap();
        assert_eq!(config.canvas_width, 640);
        assert_eq!(config.canvas_height, 700);
        assert_eq!(config.theme.grid, palette::WHITE);
        assert_eq!(config.theme.background_end, palette::BRAND_BLUE);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ViewerConfig::from_ron("(grid_spacing: 0)").is_err());
        assert!(ViewerConfig::from_ron(r#"(theme: (grid: "blue"))"#).is_err());
    }
}
