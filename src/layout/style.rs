//! Resolved visual style: geometry, palette, brand text

use crate::config::{Config, ImageFitMode, LayoutConfig};
use crate::{ConfigError, ConfigResult};

pub use crate::text_flow::FontSpec;

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional)
    ///
    /// # Example
    ///
    /// ```
    /// use product_poster::layout::Color;
    ///
    /// assert_eq!(Color::from_hex("#c8102e").unwrap(), Color::rgb(0xc8, 0x10, 0x2e));
    /// assert!(Color::from_hex("red").is_err());
    /// ```
    pub fn from_hex(value: &str) -> Result<Color, ConfigError> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ConfigError::InvalidColor(value.to_string()));
        }
        let bytes = hex::decode(digits).map_err(|_| ConfigError::InvalidColor(value.to_string()))?;
        match bytes.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            _ => Err(ConfigError::InvalidColor(value.to_string())),
        }
    }
}

/// Horizontal anchoring of a text run relative to its `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Outline drawn around a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub gold: Color,
    pub light_bg: Color,
    pub border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            primary: Color::rgb(0x1a, 0x1a, 0x1a),
            secondary: Color::rgb(0x66, 0x66, 0x66),
            accent: Color::rgb(0xc8, 0x10, 0x2e),
            gold: Color::rgb(0xd4, 0xaf, 0x37),
            light_bg: Color::rgb(0xf8, 0xf9, 0xfa),
            border: Color::rgb(0xe5, 0xe5, 0xe5),
        }
    }
}

/// Everything the compositor needs besides the record and the canvas size
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub padding: f32,
    pub header_height: f32,
    pub image_height: f32,
    pub section_gap: f32,
    pub qr_size: f32,
    pub image_fit: ImageFitMode,
    pub title_max_lines: usize,
    pub description_max_lines: usize,
    pub item_max_lines: usize,
    pub highlights_reserve: f32,
    pub usage_reserve: f32,
    pub palette: Palette,
    pub brand_name: String,
    pub website: String,
    pub tagline: String,
    pub highlights_label: String,
    pub usage_label: String,
}

impl Style {
    /// Resolves a validated configuration into a style
    pub fn from_config(config: &Config) -> ConfigResult<Style> {
        let colors = &config.colors;
        let palette = Palette {
            background: Color::from_hex(&colors.background)?,
            primary: Color::from_hex(&colors.primary)?,
            secondary: Color::from_hex(&colors.secondary)?,
            accent: Color::from_hex(&colors.accent)?,
            gold: Color::from_hex(&colors.gold)?,
            light_bg: Color::from_hex(&colors.light_bg)?,
            border: Color::from_hex(&colors.border)?,
        };
        Ok(Self::with_palette(config, palette))
    }

    /// Same style with a different image fit
    pub fn with_image_fit(mut self, image_fit: ImageFitMode) -> Self {
        self.image_fit = image_fit;
        self
    }

    fn with_palette(config: &Config, palette: Palette) -> Self {
        let LayoutConfig {
            padding,
            header_height,
            product_image_height,
            section_gap,
            qr_size,
            image_fit,
            title_max_lines,
            description_max_lines,
            item_max_lines,
            highlights_footer_reserve,
            usage_footer_reserve,
        } = config.layout;

        Self {
            padding: padding as f32,
            header_height: header_height as f32,
            image_height: product_image_height as f32,
            section_gap: section_gap as f32,
            qr_size: qr_size as f32,
            image_fit,
            title_max_lines,
            description_max_lines,
            item_max_lines,
            highlights_reserve: highlights_footer_reserve as f32,
            usage_reserve: usage_footer_reserve as f32,
            palette,
            brand_name: config.brand.name.clone(),
            website: config.brand.website.clone(),
            tagline: config.brand.tagline.clone(),
            highlights_label: config.labels.highlights.clone(),
            usage_label: config.labels.usage.clone(),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::with_palette(&Config::default(), Palette::default())
    }
}
