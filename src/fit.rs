//! Fitting a source image into a fixed box

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Same rectangle moved by `(dx, dy)`
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Same rectangle grown by `amount` on every side
    pub fn inflate(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }
}

/// Which part of the source is drawn where, relative to the box origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Region of the source image, in source pixels
    pub src: Rect,
    /// Region of the box it is drawn into
    pub dest: Rect,
}

fn valid(values: &[f32]) -> bool {
    values.iter().all(|v| v.is_finite() && *v > 0.0)
}

/// Scales the whole source to fit inside the box, centered, never cropped
///
/// Returns None when any dimension is zero, negative or not finite.
///
/// # Example
///
/// ```
/// use product_poster::fit::contain;
///
/// let fit = contain(300.0, 450.0, 500.0, 500.0).unwrap();
/// assert!((fit.dest.width - 333.33).abs() < 0.01);
/// assert!((fit.dest.height - 500.0).abs() < 0.01);
/// ```
pub fn contain(cw: f32, ch: f32, bw: f32, bh: f32) -> Option<Fit> {
    if !valid(&[cw, ch, bw, bh]) {
        return None;
    }
    let scale = (bw / cw).min(bh / ch);
    let width = cw * scale;
    let height = ch * scale;

    Some(Fit {
        src: Rect::new(0.0, 0.0, cw, ch),
        dest: Rect::new((bw - width) / 2.0, (bh - height) / 2.0, width, height),
    })
}

/// Scales the source to fill the box, cropping the overflow evenly
///
/// Returns None when any dimension is zero, negative or not finite.
pub fn cover(cw: f32, ch: f32, bw: f32, bh: f32) -> Option<Fit> {
    if !valid(&[cw, ch, bw, bh]) {
        return None;
    }
    let scale = (bw / cw).max(bh / ch);
    let src_width = bw / scale;
    let src_height = bh / scale;

    Some(Fit {
        src: Rect::new(
            (cw - src_width) / 2.0,
            (ch - src_height) / 2.0,
            src_width,
            src_height,
        ),
        dest: Rect::new(0.0, 0.0, bw, bh),
    })
}
