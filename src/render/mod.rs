//! Rasterization of draw commands
//!
//! [`Surface`] is the boundary between layout and pixels. [`paint`] replays
//! a command list onto any surface; [`RasterSurface`] is the one
//! implementation, drawing into an in-memory RGBA image.

pub mod fonts;
pub mod qr;
pub mod raster;

pub use fonts::FontBook;
pub use qr::{render_qr, QrError};
pub use raster::{decode_image, encode_png, RasterSurface};

use crate::fit::Rect;
use crate::layout::{Color, DrawCommand, FontSpec, ImageSlot, Point, Stroke, TextAlign};
use image::RgbaImage;
use thiserror::Error;

/// Failure to obtain one of the poster's bitmaps
///
/// Never fatal: the generator turns these into warnings and the affected
/// section degrades.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to fetch image {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Image request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode image {url}: {message}")]
    Decode { url: String, message: String },

    #[error(transparent)]
    Qr(#[from] QrError),
}

/// Drawing operations a backend must provide
pub trait Surface {
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: Stroke);

    fn draw_line(&mut self, from: Point, to: Point, width: f32, color: Color);

    /// Draws one line of text with its baseline at `baseline`
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, font: FontSpec, color: Color, align: TextAlign);

    /// Draws `src` of `image` scaled into `dest`, masked to the rounded `clip`
    fn draw_image_region(
        &mut self,
        image: &RgbaImage,
        src: Rect,
        dest: Rect,
        clip: Option<Rect>,
        corner_radius: f32,
    );
}

/// Bitmaps available to image commands
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSources<'a> {
    pub product: Option<&'a RgbaImage>,
    pub qr: Option<&'a RgbaImage>,
}

impl<'a> ImageSources<'a> {
    pub fn get(&self, slot: ImageSlot) -> Option<&'a RgbaImage> {
        match slot {
            ImageSlot::Product => self.product,
            ImageSlot::QrCode => self.qr,
        }
    }
}

/// Replays `commands` onto `surface` in order
///
/// Image commands whose slot has no bitmap are skipped.
pub fn paint<S: Surface + ?Sized>(commands: &[DrawCommand], surface: &mut S, images: ImageSources<'_>) {
    for command in commands {
        match command {
            DrawCommand::Text {
                text,
                x,
                y,
                font,
                color,
                align,
            } => surface.draw_text(text, *x, *y, *font, *color, *align),
            DrawCommand::ImageRegion {
                slot,
                src,
                dest,
                clip,
                corner_radius,
            } => match images.get(*slot) {
                Some(image) => surface.draw_image_region(image, *src, *dest, *clip, *corner_radius),
                None => tracing::debug!("No bitmap for {:?}, skipping", slot),
            },
            DrawCommand::RoundedRect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                if let Some(fill) = fill {
                    surface.fill_rounded_rect(*rect, *radius, *fill);
                }
                if let Some(stroke) = stroke {
                    surface.stroke_rounded_rect(*rect, *radius, *stroke);
                }
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => surface.draw_line(*from, *to, *width, *color),
        }
    }
}
