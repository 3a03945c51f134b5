//! Layout compositor
//!
//! Turns a [`ProductRecord`] into a list of [`DrawCommand`]s in one forward
//! pass. A vertical cursor starts at the top padding and is threaded through
//! the sections in a fixed order; each section returns its commands and the
//! cursor where the next one begins. Sections without data return the
//! cursor unchanged, so an absent field never leaves a gap.
//!
//! The compositor does no I/O. Asset availability comes in as an
//! [`AssetSet`] and text width comes from a [`TextMeasure`], which keeps the
//! output a pure function of its inputs.

pub mod commands;
mod sections;
pub mod style;

pub use commands::{DrawCommand, ImageSlot, Point};
pub use style::{Color, FontSpec, Palette, Stroke, Style, TextAlign};

use crate::config::CanvasConfig;
use crate::fit::Rect;
use crate::record::ProductRecord;
use crate::text_flow::TextMeasure;

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<&CanvasConfig> for CanvasSize {
    fn from(canvas: &CanvasConfig) -> Self {
        Self::new(canvas.width, canvas.height)
    }
}

/// Outcome of loading one bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    /// Nothing to load
    Missing,
    /// Loading was attempted and failed
    Failed,
    Loaded { width: u32, height: u32 },
}

/// Availability of the bitmaps the layout may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSet {
    pub product: AssetState,
    pub qr: AssetState,
}

impl AssetSet {
    /// Product image absent, QR code rendered at `qr_size` pixels
    pub fn qr_only(qr_size: u32) -> Self {
        Self {
            product: AssetState::Missing,
            qr: AssetState::Loaded {
                width: qr_size,
                height: qr_size,
            },
        }
    }
}

/// Poster sections in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    ProductImage,
    TitleBlock,
    Description,
    Highlights,
    Usage,
    Footer,
}

impl Section {
    pub const ORDER: [Section; 7] = [
        Section::Header,
        Section::ProductImage,
        Section::TitleBlock,
        Section::Description,
        Section::Highlights,
        Section::Usage,
        Section::Footer,
    ];
}

/// Cursor positions before and after one section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub section: Section,
    pub start: f32,
    pub end: f32,
    /// Number of commands the section emitted
    pub commands: usize,
}

impl SectionSpan {
    pub fn advance(&self) -> f32 {
        self.end - self.start
    }
}

/// Commands plus the per-section cursor trace
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub commands: Vec<DrawCommand>,
    pub spans: Vec<SectionSpan>,
}

impl Composition {
    pub fn span(&self, section: Section) -> Option<&SectionSpan> {
        self.spans.iter().find(|span| span.section == section)
    }
}

/// Lays out records on a canvas with a fixed style and text measure
pub struct Composer<'a, M> {
    canvas: CanvasSize,
    style: &'a Style,
    measure: M,
}

impl<'a, M: TextMeasure> Composer<'a, M> {
    pub fn new(canvas: CanvasSize, style: &'a Style, measure: M) -> Self {
        Self {
            canvas,
            style,
            measure,
        }
    }

    /// Draw commands for `record`, background first
    ///
    /// # Example
    ///
    /// ```
    /// use product_poster::layout::{AssetSet, CanvasSize, Composer, Style};
    /// use product_poster::render::FontBook;
    /// use product_poster::ProductRecord;
    ///
    /// let style = Style::default();
    /// let fonts = FontBook::empty();
    /// let composer = Composer::new(CanvasSize::new(1080, 1440), &style, &fonts);
    /// let record = ProductRecord::builder("https://shop.example/p/1").name("Fish Oil").build();
    ///
    /// let commands = composer.compose(&record, &AssetSet::qr_only(160));
    /// assert!(commands.iter().any(|c| c.text() == Some("Fish Oil")));
    /// ```
    pub fn compose(&self, record: &ProductRecord, assets: &AssetSet) -> Vec<DrawCommand> {
        self.compose_traced(record, assets).commands
    }

    /// Like [`compose`](Self::compose), also reporting each section's span
    pub fn compose_traced(&self, record: &ProductRecord, assets: &AssetSet) -> Composition {
        let mut commands = vec![DrawCommand::RoundedRect {
            rect: Rect::new(0.0, 0.0, self.width(), self.height()),
            radius: 0.0,
            fill: Some(self.style.palette.background),
            stroke: None,
        }];
        let mut spans = Vec::with_capacity(Section::ORDER.len());
        let mut cursor = self.style.padding;

        for section in Section::ORDER {
            let (section_commands, next) = match section {
                Section::Header => self.header(cursor),
                Section::ProductImage => self.product_image(cursor, record, assets.product),
                Section::TitleBlock => self.title_block(cursor, record),
                Section::Description => self.description(cursor, record),
                Section::Highlights => self.highlights(cursor, record),
                Section::Usage => self.usage(cursor, record),
                Section::Footer => self.footer(cursor, assets.qr),
            };
            tracing::trace!(
                "{:?}: cursor {} -> {} ({} commands)",
                section,
                cursor,
                next,
                section_commands.len()
            );
            spans.push(SectionSpan {
                section,
                start: cursor,
                end: next,
                commands: section_commands.len(),
            });
            commands.extend(section_commands);
            cursor = next;
        }

        Composition { commands, spans }
    }

    fn width(&self) -> f32 {
        self.canvas.width as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height as f32
    }

    fn content_width(&self) -> f32 {
        self.width() - self.style.padding * 2.0
    }
}
