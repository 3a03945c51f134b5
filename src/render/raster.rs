//! RGBA raster surface
//!
//! Shapes use a one-pixel anti-aliased edge computed from the signed
//! distance of each pixel center to the shape outline.

use crate::fit::Rect;
use crate::layout::{Color, FontSpec, Point, Stroke, TextAlign};
use crate::render::fonts::FontBook;
use crate::render::Surface;
use crate::text_flow::TextMeasure;
use image::imageops::{self, FilterType};
use image::{ImageEncoder, RgbaImage};

/// Raster implementation of [`Surface`] backed by an [`RgbaImage`]
pub struct RasterSurface<'f> {
    image: RgbaImage,
    fonts: &'f FontBook,
}

impl<'f> RasterSurface<'f> {
    /// Transparent canvas of the given size
    pub fn new(width: u32, height: u32, fonts: &'f FontBook) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            fonts,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Blends `color` over the pixel at `(x, y)` with the given coverage
    fn blend(&mut self, x: i64, y: i64, rgb: [u8; 3], coverage: f32) {
        if coverage <= 0.0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }

        let a = coverage.min(1.0);
        let inv = 1.0 - a;
        let dst = self.image.get_pixel_mut(x, y);
        let dst_a = dst.0[3] as f32 / 255.0;
        for i in 0..3 {
            dst.0[i] = (rgb[i] as f32 * a + dst.0[i] as f32 * inv).round() as u8;
        }
        dst.0[3] = ((a + dst_a * inv) * 255.0).round() as u8;
    }

    /// Pixel index range covering `from..to` on an axis of `len` pixels
    fn span(from: f32, to: f32, len: u32) -> std::ops::Range<i64> {
        let start = from.floor().max(0.0) as i64;
        let end = (to.ceil() as i64).min(len as i64);
        start..end.max(start)
    }

    fn shade(&mut self, bounds: Rect, rgb: [u8; 3], coverage: impl Fn(f32, f32) -> f32) {
        let ys = Self::span(bounds.y, bounds.bottom(), self.image.height());
        let xs = Self::span(bounds.x, bounds.right(), self.image.width());
        for y in ys {
            for x in xs.clone() {
                let c = coverage(x as f32 + 0.5, y as f32 + 0.5);
                self.blend(x, y, rgb, c);
            }
        }
    }
}

impl Surface for RasterSurface<'_> {
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.shade(rect.inflate(1.0), rgb(color), |px, py| {
            (0.5 - rounded_rect_distance(rect, radius, px, py)).clamp(0.0, 1.0)
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: Stroke) {
        let half = stroke.width / 2.0;
        self.shade(rect.inflate(half + 1.0), rgb(stroke.color), |px, py| {
            let d = rounded_rect_distance(rect, radius, px, py);
            (half + 0.5 - d.abs()).clamp(0.0, 1.0)
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        let half = width / 2.0;
        let bounds = Rect::new(
            from.x.min(to.x) - half - 1.0,
            from.y.min(to.y) - half - 1.0,
            (from.x - to.x).abs() + width + 2.0,
            (from.y - to.y).abs() + width + 2.0,
        );
        self.shade(bounds, rgb(color), |px, py| {
            (half + 0.5 - segment_distance(from, to, px, py)).clamp(0.0, 1.0)
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, font: FontSpec, color: Color, align: TextAlign) {
        let start = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - self.fonts.width(text, font) / 2.0,
        };
        let color = rgb(color);

        for glyph in self.fonts.layout(text, font, start, baseline) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            let mut coverage = Vec::new();
            glyph.draw(|gx, gy, v| coverage.push((gx as i64 + bb.min.x as i64, gy as i64 + bb.min.y as i64, v)));
            for (px, py, v) in coverage {
                self.blend(px, py, color, v);
            }
        }
    }

    fn draw_image_region(
        &mut self,
        source: &RgbaImage,
        src: Rect,
        dest: Rect,
        clip: Option<Rect>,
        corner_radius: f32,
    ) {
        let Some(region) = crop_region(source, src) else {
            return;
        };
        let width = dest.width.round().max(1.0) as u32;
        let height = dest.height.round().max(1.0) as u32;
        let scaled = imageops::resize(&region, width, height, FilterType::Triangle);

        let origin_x = dest.x.round() as i64;
        let origin_y = dest.y.round() as i64;
        for (ox, oy, pixel) in scaled.enumerate_pixels() {
            let x = origin_x + ox as i64;
            let y = origin_y + oy as i64;
            let mask = match clip {
                Some(clip) => {
                    let d = rounded_rect_distance(clip, corner_radius, x as f32 + 0.5, y as f32 + 0.5);
                    (0.5 - d).clamp(0.0, 1.0)
                }
                None => 1.0,
            };
            let alpha = pixel.0[3] as f32 / 255.0 * mask;
            self.blend(x, y, [pixel.0[0], pixel.0[1], pixel.0[2]], alpha);
        }
    }
}

fn rgb(color: Color) -> [u8; 3] {
    [color.r, color.g, color.b]
}

/// Integer crop of `src` clamped to the image bounds
fn crop_region(image: &RgbaImage, src: Rect) -> Option<RgbaImage> {
    let x = src.x.max(0.0).floor() as u32;
    let y = src.y.max(0.0).floor() as u32;
    if x >= image.width() || y >= image.height() {
        return None;
    }
    let width = (src.width.round() as u32).clamp(1, image.width() - x);
    let height = (src.height.round() as u32).clamp(1, image.height() - y);
    Some(imageops::crop_imm(image, x, y, width, height).to_image())
}

/// Signed distance from `(px, py)` to the outline of a rounded rectangle
///
/// Negative inside, positive outside.
pub fn rounded_rect_distance(rect: Rect, radius: f32, px: f32, py: f32) -> f32 {
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let r = radius.min(half_w).min(half_h).max(0.0);

    let qx = (px - (rect.x + half_w)).abs() - (half_w - r);
    let qy = (py - (rect.y + half_h)).abs() - (half_h - r);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

fn segment_distance(a: Point, b: Point, px: f32, py: f32) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - a.x) * dx + (py - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    (px - (a.x + t * dx)).hypot(py - (a.y + t * dy))
}

/// Encodes an RGBA image as PNG
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    encoder.write_image(image.as_raw(), image.width(), image.height(), image::ColorType::Rgba8)?;
    Ok(buf)
}

/// Decodes an image of any enabled format into RGBA
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}
