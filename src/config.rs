// JSON layout configuration. Every field is optional; missing ones fall back
// to the A4, 4 x 5 reference layout.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::geometry::{CellStyle, PageGeometry};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
    pub columns: u32,
    pub rows: u32,
    pub caption_band: f32,
    pub label_band: f32,
    pub image_gap: f32,
    pub text_margin: f32,
    pub caption_font_size: f32,
    pub label_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let geometry = PageGeometry::default();
        let style = CellStyle::default();
        Self {
            page_width: geometry.page_width,
            page_height: geometry.page_height,
            margin_x: geometry.margin_x,
            margin_y: geometry.margin_y,
            columns: geometry.columns,
            rows: geometry.rows,
            caption_band: style.caption_band,
            label_band: style.label_band,
            image_gap: style.image_gap,
            text_margin: style.text_margin,
            caption_font_size: style.caption_font_size,
            label_font_size: style.label_font_size,
        }
    }
}

impl LayoutConfig {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, Error> {
        let config: LayoutConfig = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid JSON: {}", e)))?;
        config.geometry().validate()?;
        config.style().validate()?;
        Ok(config)
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            page_width: self.page_width,
            page_height: self.page_height,
            margin_x: self.margin_x,
            margin_y: self.margin_y,
            columns: self.columns,
            rows: self.rows,
        }
    }

    pub fn style(&self) -> CellStyle {
        CellStyle {
            caption_band: self.caption_band,
            label_band: self.label_band,
            image_gap: self.image_gap,
            text_margin: self.text_margin,
            caption_font_size: self.caption_font_size,
            label_font_size: self.label_font_size,
        }
    }
}
