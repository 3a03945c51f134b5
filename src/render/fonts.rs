//! Font faces for measuring and painting text

use crate::config::FontConfig;
use crate::text_flow::{FontSpec, TextMeasure};
use crate::{ConfigError, ConfigResult};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::path::Path;

/// Advance of a narrow (ASCII) character when no face is loaded, in ems
const FALLBACK_NARROW_EM: f32 = 0.5;

/// Advance of a wide (CJK, emoji) character when no face is loaded, in ems
const FALLBACK_WIDE_EM: f32 = 1.0;

/// Regular and bold faces
///
/// An empty book measures with fixed per-character advances and paints
/// nothing, which is enough to lay out and rasterize shapes and images.
#[derive(Default)]
pub struct FontBook {
    regular: Option<Font<'static>>,
    bold: Option<Font<'static>>,
}

impl FontBook {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the faces named in the configuration
    ///
    /// Without a regular face the book is empty; a missing bold face falls
    /// back to the regular one.
    pub fn load(config: &FontConfig) -> ConfigResult<Self> {
        let Some(regular_path) = config.regular.as_deref() else {
            tracing::warn!("No regular font configured, text will not be painted");
            return Ok(Self::empty());
        };

        let regular = load_face(Path::new(regular_path))?;
        let bold = config
            .bold
            .as_deref()
            .map(|path| load_face(Path::new(path)))
            .transpose()?;

        tracing::debug!(
            "Loaded fonts: regular={}, bold={}",
            regular_path,
            config.bold.as_deref().unwrap_or("(regular)")
        );
        Ok(Self {
            regular: Some(regular),
            bold,
        })
    }

    /// Builds a book from in-memory font data
    pub fn from_bytes(regular: Vec<u8>, bold: Option<Vec<u8>>) -> ConfigResult<Self> {
        let regular = parse_face(regular, "<memory>")?;
        let bold = bold.map(|data| parse_face(data, "<memory>")).transpose()?;
        Ok(Self {
            regular: Some(regular),
            bold,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_none()
    }

    /// Face for `font`, bold falling back to regular
    pub fn face(&self, font: FontSpec) -> Option<&Font<'static>> {
        if font.bold {
            self.bold.as_ref().or(self.regular.as_ref())
        } else {
            self.regular.as_ref()
        }
    }

    /// Glyphs of `text` with the pen starting at `(x, baseline)`
    pub fn layout(&self, text: &str, font: FontSpec, x: f32, baseline: f32) -> Vec<PositionedGlyph<'static>> {
        match self.face(font) {
            Some(face) => face
                .layout(text, Scale::uniform(font.size), point(x, baseline))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl TextMeasure for FontBook {
    fn width(&self, text: &str, font: FontSpec) -> f32 {
        let Some(face) = self.face(font) else {
            return text.chars().map(|c| fallback_advance(c) * font.size).sum();
        };

        let scale = Scale::uniform(font.size);
        let mut width = 0.0;
        let mut previous = None;
        for c in text.chars() {
            let glyph = face.glyph(c).scaled(scale);
            if let Some(prev) = previous {
                width += face.pair_kerning(scale, prev, glyph.id());
            }
            width += glyph.h_metrics().advance_width;
            previous = Some(glyph.id());
        }
        width
    }
}

fn fallback_advance(c: char) -> f32 {
    if (c as u32) < 0x1100 {
        FALLBACK_NARROW_EM
    } else {
        FALLBACK_WIDE_EM
    }
}

fn load_face(path: &Path) -> ConfigResult<Font<'static>> {
    let data = std::fs::read(path).map_err(|e| ConfigError::Font {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_face(data, &path.display().to_string())
}

fn parse_face(data: Vec<u8>, origin: &str) -> ConfigResult<Font<'static>> {
    Font::try_from_vec(data).ok_or_else(|| ConfigError::Font {
        path: origin.to_string(),
        message: "not a TrueType/OpenType font".to_string(),
    })
}
