use std::collections::{BTreeMap, HashMap};

use super::RenderError;

/// Lookup key for a registered typeface: family name (case-insensitive)
/// plus weight/style flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
    italic: bool,
}

impl FontKey {
    fn new(family: &str, bold: bool, italic: bool) -> Self {
        Self {
            family: family.to_ascii_lowercase(),
            bold,
            italic,
        }
    }
}

/// Registry of faces the renderer draws with.
///
/// Families are registered per style variant; looking up a missing
/// bold/italic variant falls back to the family's regular face, and a
/// missing family is a rasterization failure surfaced by the renderer.
#[derive(Default)]
pub struct FontLibrary {
    faces: HashMap<FontKey, Box<dyn FontFace + Send + Sync>>,
    /// Lowercase lookup name to the family name as first registered,
    /// so the UI shows "Inter" rather than "inter".
    display_names: BTreeMap<String, String>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and registers a font file for the given family/style.
    pub fn register(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        bytes: &[u8],
    ) -> Result<(), RenderError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| RenderError::FontParse {
                family: family.to_owned(),
                reason: e.to_owned(),
            })?;
        self.register_face(family, bold, italic, Box::new(font));
        Ok(())
    }

    /// Registers an already-built face. Tests use this to install
    /// synthetic faces without font files on disk.
    pub fn register_face(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        face: Box<dyn FontFace + Send + Sync>,
    ) {
        let key = FontKey::new(family, bold, italic);
        self.display_names
            .entry(key.family.clone())
            .or_insert_with(|| family.to_owned());
        self.faces.insert(key, face);
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Registered family names in their original casing, sorted
    /// case-insensitively.
    pub fn families(&self) -> Vec<String> {
        self.display_names.values().cloned().collect()
    }

    /// The face for a family/style, falling back to the family's
    /// regular face when the exact variant is not registered.
    pub fn face(
        &self,
        family: &str,
        bold: bool,
        italic: bool,
    ) -> Result<&dyn FontFace, RenderError> {
        self.faces
            .get(&FontKey::new(family, bold, italic))
            .or_else(|| self.faces.get(&FontKey::new(family, false, false)))
            .map(|face| face.as_ref() as &dyn FontFace)
            .ok_or_else(|| RenderError::FontUnavailable {
                family: family.to_owned(),
            })
    }
}

/// Horizontal advance and line metrics, abstracted so text wrapping can
/// be tested without font files.
pub trait TextMeasurer {
    /// Advance width of one glyph at the given pixel size.
    fn advance(&self, ch: char, px: f32) -> f32;

    /// `(ascent, descent)` at the given pixel size, both positive.
    fn line_metrics(&self, px: f32) -> (f32, f32);
}

/// Placement of one rasterized glyph, in target pixels. `xmin`/`ymin`
/// are the offsets of the bitmap from the pen position and baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    pub width: usize,
    pub height: usize,
    pub xmin: i32,
    pub ymin: i32,
    pub advance_width: f32,
}

/// A drawable typeface: measurement plus per-glyph coverage masks.
pub trait FontFace: TextMeasurer {
    /// Rasterizes one glyph at the given pixel size, returning its
    /// metrics and a row-major grayscale coverage bitmap.
    fn rasterize(&self, ch: char, px: f32) -> (GlyphMetrics, Vec<u8>);
}

impl TextMeasurer for fontdue::Font {
    fn advance(&self, ch: char, px: f32) -> f32 {
        self.metrics(ch, px).advance_width
    }

    fn line_metrics(&self, px: f32) -> (f32, f32) {
        match self.horizontal_line_metrics(px) {
            Some(lm) => (lm.ascent, lm.descent.abs()),
            // Degenerate font; approximate from the em size.
            None => (px * 0.8, px * 0.2),
        }
    }
}

impl FontFace for fontdue::Font {
    fn rasterize(&self, ch: char, px: f32) -> (GlyphMetrics, Vec<u8>) {
        let (metrics, bitmap) = fontdue::Font::rasterize(self, ch, px);
        (
            GlyphMetrics {
                width: metrics.width,
                height: metrics.height,
                xmin: metrics.xmin,
                ymin: metrics.ymin,
                advance_width: metrics.advance_width,
            },
            bitmap,
        )
    }
}
