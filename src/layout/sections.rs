//! The individual poster sections
//!
//! Each takes the cursor where it starts and returns its commands together
//! with the cursor where the next section starts.

use super::{AssetState, Composer, DrawCommand, ImageSlot, Point};
use crate::config::ImageFitMode;
use crate::fit::{contain, cover, Fit, Rect};
use crate::layout::style::{Color, FontSpec, Stroke, TextAlign};
use crate::record::ProductRecord;
use crate::text_flow::{wrap_clamped, TextMeasure};

type Placed = (Vec<DrawCommand>, f32);

// Header
const BRAND_FONT: FontSpec = FontSpec::bold(56.0);
const BRAND_BASELINE: f32 = 45.0;
const DIVIDER_OFFSET: f32 = 75.0;
const DIVIDER_INSET: f32 = 200.0;
const DIVIDER_WIDTH: f32 = 2.0;

// Product image
const IMAGE_RADIUS: f32 = 16.0;

// Title block
const TITLE_FONT: FontSpec = FontSpec::bold(46.0);
const TITLE_LINE_HEIGHT: f32 = 56.0;
const TITLE_GAP: f32 = 20.0;
const SUBTITLE_FONT: FontSpec = FontSpec::regular(24.0);
const SUBTITLE_ADVANCE: f32 = 40.0;
const PRICE_FONT: FontSpec = FontSpec::bold(32.0);
const PRICE_ADVANCE: f32 = 50.0;
const PRICE_SEPARATOR: &str = "  |  ";

// Description
const DESCRIPTION_FONT: FontSpec = FontSpec::regular(24.0);
const DESCRIPTION_LINE_HEIGHT: f32 = 36.0;
const DESCRIPTION_INSET: f32 = 100.0;
const DESCRIPTION_GAP: f32 = 40.0;

// Lists
const HEADING_FONT: FontSpec = FontSpec::bold(36.0);
const HEADING_ADVANCE: f32 = 50.0;
const LIST_INSET: f32 = 80.0;
const HIGHLIGHT_FONT: FontSpec = FontSpec::regular(26.0);
const HIGHLIGHT_LINE_HEIGHT: f32 = 38.0;
const HIGHLIGHT_ROW_GAP: f32 = 15.0;
const HIGHLIGHT_TEXT_OFFSET: f32 = 50.0;
const HIGHLIGHTS_TRAILING_GAP: f32 = 30.0;
const BULLET_OFFSET: f32 = 20.0;
const BULLET_RISE: f32 = 6.0;
const BULLET_RADIUS: f32 = 6.0;
const USAGE_FONT: FontSpec = FontSpec::regular(24.0);
const USAGE_LINE_HEIGHT: f32 = 34.0;
const USAGE_ROW_GAP: f32 = 10.0;
const USAGE_TEXT_OFFSET: f32 = 20.0;

// Footer
const QR_LIFT: f32 = 40.0;
const QR_FRAME_MARGIN: f32 = 10.0;
const QR_FRAME_RADIUS: f32 = 12.0;
const QR_FRAME_STROKE: f32 = 2.0;
const TAGLINE_FONT: FontSpec = FontSpec::regular(20.0);
const TAGLINE_OFFSET: f32 = 32.0;
const WEBSITE_FONT: FontSpec = FontSpec::regular(22.0);
const WEBSITE_LIFT: f32 = 15.0;

fn text(text: impl Into<String>, x: f32, y: f32, font: FontSpec, color: Color, align: TextAlign) -> DrawCommand {
    DrawCommand::Text {
        text: text.into(),
        x,
        y,
        font,
        color,
        align,
    }
}

/// One bulleted or plain row of a list section
struct ListRow {
    font: FontSpec,
    color: Color,
    text_x: f32,
    line_height: f32,
    row_gap: f32,
    bullet: Option<Color>,
}

impl<M: TextMeasure> Composer<'_, M> {
    /// Wraps and clamps `value` for `font` at `max_width`
    fn lines(&self, value: &str, font: FontSpec, max_width: f32, max_lines: usize) -> Vec<String> {
        let measure = |s: &str| self.measure.width(s, font);
        wrap_clamped(value, measure, max_width, max_lines).0
    }

    pub(super) fn header(&self, y: f32) -> Placed {
        let style = self.style;
        let mut commands = Vec::new();

        if !style.brand_name.is_empty() {
            commands.push(text(
                style.brand_name.as_str(),
                self.width() / 2.0,
                y + BRAND_BASELINE,
                BRAND_FONT,
                style.palette.gold,
                TextAlign::Center,
            ));
        }
        commands.push(DrawCommand::Line {
            from: Point::new(style.padding + DIVIDER_INSET, y + DIVIDER_OFFSET),
            to: Point::new(self.width() - style.padding - DIVIDER_INSET, y + DIVIDER_OFFSET),
            width: DIVIDER_WIDTH,
            color: style.palette.border,
        });

        (commands, y + style.header_height)
    }

    pub(super) fn product_image(&self, y: f32, record: &ProductRecord, asset: AssetState) -> Placed {
        let style = self.style;
        if record.image.is_none() || asset == AssetState::Missing {
            return (Vec::new(), y);
        }

        let frame = Rect::new(style.padding, y, self.content_width(), style.image_height);
        let mut commands = vec![DrawCommand::RoundedRect {
            rect: frame,
            radius: IMAGE_RADIUS,
            fill: Some(style.palette.light_bg),
            stroke: None,
        }];

        if let AssetState::Loaded { width, height } = asset {
            let fitter: fn(f32, f32, f32, f32) -> Option<Fit> = match style.image_fit {
                ImageFitMode::Contain => contain,
                ImageFitMode::Cover => cover,
            };
            if let Some(fit) = fitter(width as f32, height as f32, frame.width, frame.height) {
                commands.push(DrawCommand::ImageRegion {
                    slot: ImageSlot::Product,
                    src: fit.src,
                    dest: fit.dest.offset(frame.x, frame.y),
                    clip: Some(frame),
                    corner_radius: IMAGE_RADIUS,
                });
            }
        }

        (commands, y + style.image_height + style.section_gap)
    }

    pub(super) fn title_block(&self, y: f32, record: &ProductRecord) -> Placed {
        let style = self.style;
        let center = self.width() / 2.0;
        let max_width = self.content_width();
        let mut commands = Vec::new();

        let title = self.lines(&record.name, TITLE_FONT, max_width, style.title_max_lines);
        for (i, line) in title.iter().enumerate() {
            commands.push(text(
                line.as_str(),
                center,
                y + i as f32 * TITLE_LINE_HEIGHT,
                TITLE_FONT,
                style.palette.primary,
                TextAlign::Center,
            ));
        }
        let mut cursor = y + title.len() as f32 * TITLE_LINE_HEIGHT + TITLE_GAP;

        if let Some(subtitle) = &record.subtitle {
            if let Some(line) = self.lines(subtitle, SUBTITLE_FONT, max_width, 1).pop() {
                commands.push(text(line, center, cursor, SUBTITLE_FONT, style.palette.secondary, TextAlign::Center));
            }
            cursor += SUBTITLE_ADVANCE;
        }

        let price_line = match (&record.price, &record.specs) {
            (Some(price), Some(specs)) => Some(format!("{}{}{}", price, PRICE_SEPARATOR, specs)),
            (Some(price), None) => Some(price.clone()),
            (None, Some(specs)) => Some(specs.clone()),
            (None, None) => None,
        };
        if let Some(price_line) = price_line {
            if let Some(line) = self.lines(&price_line, PRICE_FONT, max_width, 1).pop() {
                commands.push(text(line, center, cursor, PRICE_FONT, style.palette.accent, TextAlign::Center));
            }
            cursor += PRICE_ADVANCE;
        }

        (commands, cursor)
    }

    pub(super) fn description(&self, y: f32, record: &ProductRecord) -> Placed {
        let style = self.style;
        let Some(description) = &record.description else {
            return (Vec::new(), y);
        };

        let lines = self.lines(
            description,
            DESCRIPTION_FONT,
            self.content_width() - DESCRIPTION_INSET,
            style.description_max_lines,
        );
        if lines.is_empty() {
            return (Vec::new(), y);
        }

        let center = self.width() / 2.0;
        let advance = lines.len() as f32 * DESCRIPTION_LINE_HEIGHT + DESCRIPTION_GAP;
        let commands = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                text(
                    line,
                    center,
                    y + i as f32 * DESCRIPTION_LINE_HEIGHT,
                    DESCRIPTION_FONT,
                    style.palette.secondary,
                    TextAlign::Center,
                )
            })
            .collect();

        (commands, y + advance)
    }

    pub(super) fn highlights(&self, y: f32, record: &ProductRecord) -> Placed {
        let style = self.style;
        let row = ListRow {
            font: HIGHLIGHT_FONT,
            color: style.palette.primary,
            text_x: style.padding + HIGHLIGHT_TEXT_OFFSET,
            line_height: HIGHLIGHT_LINE_HEIGHT,
            row_gap: HIGHLIGHT_ROW_GAP,
            bullet: Some(style.palette.accent),
        };
        let safe_bottom = self.height() - style.highlights_reserve;

        match self.list_section(y, &style.highlights_label, &record.highlights, &row, safe_bottom) {
            Some((commands, cursor)) => (commands, cursor + HIGHLIGHTS_TRAILING_GAP),
            None => (Vec::new(), y),
        }
    }

    pub(super) fn usage(&self, y: f32, record: &ProductRecord) -> Placed {
        let style = self.style;
        let row = ListRow {
            font: USAGE_FONT,
            color: style.palette.secondary,
            text_x: style.padding + USAGE_TEXT_OFFSET,
            line_height: USAGE_LINE_HEIGHT,
            row_gap: USAGE_ROW_GAP,
            bullet: None,
        };
        let safe_bottom = self.height() - style.usage_reserve;

        self.list_section(y, &style.usage_label, &record.usage, &row, safe_bottom)
            .unwrap_or((Vec::new(), y))
    }

    /// Heading plus rows; rows starting below `safe_bottom` are dropped whole
    fn list_section(
        &self,
        y: f32,
        heading: &str,
        items: &[String],
        row: &ListRow,
        safe_bottom: f32,
    ) -> Option<Placed> {
        if items.is_empty() {
            return None;
        }
        let style = self.style;
        let max_width = self.content_width() - LIST_INSET;

        let mut commands = vec![text(
            heading,
            style.padding,
            y,
            HEADING_FONT,
            style.palette.primary,
            TextAlign::Left,
        )];
        let mut cursor = y + HEADING_ADVANCE;

        for item in items {
            if cursor > safe_bottom {
                tracing::debug!("Dropping row below safe bottom {}: {}", safe_bottom, item);
                continue;
            }

            if let Some(bullet) = row.bullet {
                let center = Point::new(style.padding + BULLET_OFFSET, cursor - BULLET_RISE);
                commands.push(DrawCommand::RoundedRect {
                    rect: Rect::new(
                        center.x - BULLET_RADIUS,
                        center.y - BULLET_RADIUS,
                        BULLET_RADIUS * 2.0,
                        BULLET_RADIUS * 2.0,
                    ),
                    radius: BULLET_RADIUS,
                    fill: Some(bullet),
                    stroke: None,
                });
            }

            let lines = self.lines(item, row.font, max_width, style.item_max_lines);
            for (i, line) in lines.iter().enumerate() {
                commands.push(text(
                    line.as_str(),
                    row.text_x,
                    cursor + i as f32 * row.line_height,
                    row.font,
                    row.color,
                    TextAlign::Left,
                ));
            }
            cursor += lines.len() as f32 * row.line_height + row.row_gap;
        }

        Some((commands, cursor))
    }

    /// Anchored to the canvas bottom; leaves the cursor where it is
    pub(super) fn footer(&self, y: f32, qr: AssetState) -> Placed {
        let style = self.style;
        let size = style.qr_size;
        let qr_x = self.width() - style.padding - size;
        let qr_y = self.height() - style.padding - size - QR_LIFT;
        let qr_rect = Rect::new(qr_x, qr_y, size, size);

        let mut commands = vec![DrawCommand::RoundedRect {
            rect: qr_rect.inflate(QR_FRAME_MARGIN),
            radius: QR_FRAME_RADIUS,
            fill: Some(Color::WHITE),
            stroke: Some(Stroke {
                color: style.palette.border,
                width: QR_FRAME_STROKE,
            }),
        }];

        if let AssetState::Loaded { width, height } = qr {
            commands.push(DrawCommand::ImageRegion {
                slot: ImageSlot::QrCode,
                src: Rect::new(0.0, 0.0, width as f32, height as f32),
                dest: qr_rect,
                clip: None,
                corner_radius: 0.0,
            });
        }

        if !style.tagline.is_empty() {
            commands.push(text(
                style.tagline.as_str(),
                qr_x + size / 2.0,
                qr_y + size + TAGLINE_OFFSET,
                TAGLINE_FONT,
                style.palette.secondary,
                TextAlign::Center,
            ));
        }
        if !style.website.is_empty() {
            commands.push(text(
                style.website.as_str(),
                style.padding,
                self.height() - style.padding - WEBSITE_LIFT,
                WEBSITE_FONT,
                style.palette.gold,
                TextAlign::Left,
            ));
        }

        (commands, y)
    }
}
