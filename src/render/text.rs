//! Greedy word-wrapping text layout and glyph compositing.
//!
//! Wrapping and measurement run against the [`TextMeasurer`] trait and
//! drawing against [`FontFace`], so both halves are testable without
//! font files on disk.

use image::RgbaImage;

use super::fonts::{FontFace, TextMeasurer};
use super::raster::{self, ClipRect};
use crate::model::{TextAlign, VerticalAlign};

/// Width of one line: glyph advances plus letter spacing between
/// consecutive glyphs.
pub fn line_width<M: TextMeasurer + ?Sized>(
    line: &str,
    measurer: &M,
    px: f32,
    letter_spacing: f32,
) -> f32 {
    let mut width = 0.0;
    let mut count = 0usize;
    for ch in line.chars() {
        width += measurer.advance(ch, px) + letter_spacing;
        count += 1;
    }
    if count > 0 {
        width -= letter_spacing;
    }
    width.max(0.0)
}

/// Breaks `text` into lines no wider than `max_width`.
///
/// Hard newlines are honored first, then words wrap greedily; a single
/// word wider than the whole rect breaks per character so layout always
/// makes progress.
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    text: &str,
    measurer: &M,
    px: f32,
    letter_spacing: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    for hard_line in text.split('\n') {
        if hard_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in hard_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_owned()
            } else {
                format!("{current} {word}")
            };
            if line_width(&candidate, measurer, px, letter_spacing) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // Word alone fits on a fresh line?
            if line_width(word, measurer, px, letter_spacing) <= max_width {
                current = word.to_owned();
            } else {
                // Oversized word: break per character.
                for ch in word.chars() {
                    let mut attempt = current.clone();
                    attempt.push(ch);
                    if !current.is_empty()
                        && line_width(&attempt, measurer, px, letter_spacing) > max_width
                    {
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    } else {
                        current = attempt;
                    }
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Styling inputs for one text block, already scaled to target pixels.
#[derive(Debug, Clone, Copy)]
pub struct TextBlockStyle {
    pub px: f32,
    pub line_height: f32,
    pub letter_spacing: f32,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub underline: bool,
    pub color: [u8; 4],
}

/// Lays out and composites `text` inside `content`, clipping anything
/// that overflows the rect.
pub fn draw_text_block(
    canvas: &mut RgbaImage,
    content: ClipRect,
    text: &str,
    font: &dyn FontFace,
    style: &TextBlockStyle,
) {
    if text.trim().is_empty() || content.width() == 0 || content.height() == 0 {
        return;
    }
    let max_width = content.width() as f32;
    let lines = wrap_text(text, font, style.px, style.letter_spacing, max_width);
    if lines.is_empty() {
        return;
    }

    let line_advance = style.px * style.line_height;
    let block_height = line_advance * lines.len() as f32;
    let (ascent, descent) = font.line_metrics(style.px);

    let block_top = match style.vertical_align {
        VerticalAlign::Top => content.y0 as f32,
        VerticalAlign::Center => content.y0 as f32 + (content.height() as f32 - block_height) / 2.0,
        VerticalAlign::Bottom => content.y1 as f32 - block_height,
    };

    for (i, line) in lines.iter().enumerate() {
        let width = line_width(line, font, style.px, style.letter_spacing);
        let line_x = match style.align {
            TextAlign::Left => content.x0 as f32,
            TextAlign::Center => content.x0 as f32 + (max_width - width) / 2.0,
            TextAlign::Right => content.x1 as f32 - width,
        };
        let line_top = block_top + line_advance * i as f32;
        // Half-leading above and below the glyph box.
        let leading = (line_advance - (ascent + descent)) / 2.0;
        let baseline = line_top + leading + ascent;

        let mut pen = line_x;
        for ch in line.chars() {
            let (metrics, bitmap) = font.rasterize(ch, style.px);
            if metrics.width > 0 && metrics.height > 0 {
                let glyph_x = (pen + metrics.xmin as f32).round() as i64;
                let glyph_y =
                    (baseline - metrics.ymin as f32 - metrics.height as f32).round() as i64;
                raster::composite_mask(
                    canvas,
                    content,
                    &bitmap,
                    metrics.width,
                    metrics.height,
                    glyph_x,
                    glyph_y,
                    style.color,
                );
            }
            pen += metrics.advance_width + style.letter_spacing;
        }

        if style.underline && width > 0.0 {
            let thickness = (style.px / 14.0).max(1.0);
            let offset = (style.px * 0.08).max(1.0);
            raster::fill_rect(
                canvas,
                content,
                line_x,
                baseline + offset,
                width,
                thickness,
                style.color,
            );
        }
    }
}
