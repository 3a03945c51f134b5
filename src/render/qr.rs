//! QR code bitmaps
//!
//! The `qrcode` crate provides the module matrix; this adapter scales it to a
//! square RGBA bitmap with a light quiet zone around it.

use image::{Rgba, RgbaImage};
use qrcode::{Color as Module, EcLevel, QrCode};
use thiserror::Error;

/// Light modules around the symbol on each side
pub const QUIET_ZONE_MODULES: usize = 2;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR payload is empty")]
    EmptyPayload,

    #[error("QR bitmap size must be positive")]
    ZeroSize,

    #[error("QR encoding failed: {0}")]
    Encode(String),
}

/// Encodes `payload` at error-correction level H into a `size`×`size` bitmap
///
/// The output is deterministic: the same payload and size always produce
/// the same pixels.
///
/// # Example
///
/// ```
/// use product_poster::render::qr::render_qr;
///
/// let bitmap = render_qr("https://shop.example/p/1", 160).unwrap();
/// assert_eq!(bitmap.dimensions(), (160, 160));
/// ```
pub fn render_qr(payload: &str, size: u32) -> Result<RgbaImage, QrError> {
    if payload.is_empty() {
        return Err(QrError::EmptyPayload);
    }
    if size == 0 {
        return Err(QrError::ZeroSize);
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| QrError::Encode(e.to_string()))?;
    let width = code.width();
    let modules = code.to_colors();
    let total = width + QUIET_ZONE_MODULES * 2;

    let module_at = |px: u32| -> Option<usize> {
        let module = px as usize * total / size as usize;
        module
            .checked_sub(QUIET_ZONE_MODULES)
            .filter(|m| *m < width)
    };

    Ok(RgbaImage::from_fn(size, size, |x, y| {
        match (module_at(x), module_at(y)) {
            (Some(mx), Some(my)) if modules[my * width + mx] == Module::Dark => DARK,
            _ => LIGHT,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_quiet_zone() {
        let bitmap = render_qr("https://shop.example/products/p1", 160).unwrap();
        assert_eq!(bitmap.dimensions(), (160, 160));
        // quiet zone corners are light
        assert_eq!(*bitmap.get_pixel(0, 0), LIGHT);
        assert_eq!(*bitmap.get_pixel(159, 159), LIGHT);
    }

    #[test]
    fn test_finder_pattern_is_dark() {
        let payload = "https://shop.example/products/p1";
        let size = 290;
        let bitmap = render_qr(payload, size).unwrap();

        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H).unwrap();
        let total = code.width() + QUIET_ZONE_MODULES * 2;
        // center of the first symbol module, top-left finder corner
        let px = ((QUIET_ZONE_MODULES as f32 + 0.5) * size as f32 / total as f32) as u32;
        assert_eq!(*bitmap.get_pixel(px, px), DARK);
    }

    #[test]
    fn test_deterministic() {
        let a = render_qr("https://shop.example/p/2", 120).unwrap();
        let b = render_qr("https://shop.example/p/2", 120).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_rejects_degenerate_input() {
        assert!(matches!(render_qr("", 100), Err(QrError::EmptyPayload)));
        assert!(matches!(render_qr("x", 0), Err(QrError::ZeroSize)));
    }
}
