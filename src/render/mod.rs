//! Deterministic CPU rasterization of one frame.
//!
//! The same code path produces the scaled-down live preview and the
//! full-resolution export surface, so what the user sees is what the
//! exporter writes. Rendering is a pure function of (project, frame,
//! target width): identical inputs produce byte-identical pixels.

pub mod fonts;
pub mod raster;
pub mod text;

use std::collections::HashMap;

use image::RgbaImage;
use thiserror::Error;

pub use fonts::{FontFace, FontLibrary, GlyphMetrics, TextMeasurer};
pub use raster::ClipRect;

use crate::model::{
    style, Dimensions, Frame, FrameElement, Project, ShapeKind, SignaturePosition, CANONICAL_WIDTH,
};

/// Errors that abort rasterization of a frame
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("target width must be at least 1 pixel")]
    InvalidTargetWidth,

    #[error("no font registered for family {family:?}")]
    FontUnavailable { family: String },

    #[error("failed to parse font for family {family:?}: {reason}")]
    FontParse { family: String, reason: String },

    #[error("failed to read image {src:?}: {reason}")]
    ImageUnreadable { src: String, reason: String },
}

/// Resolves an element/background `src` string to decoded pixels.
///
/// The default implementation reads from the filesystem; tests and the
/// app's asset cache substitute an in-memory source.
pub trait ImageSource {
    fn load(&self, src: &str) -> Result<RgbaImage, RenderError>;
}

/// Filesystem-backed image source (`src` is a path).
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn load(&self, src: &str) -> Result<RgbaImage, RenderError> {
        image::open(src)
            .map(|img| img.to_rgba8())
            .map_err(|e| RenderError::ImageUnreadable {
                src: src.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// In-memory image source keyed by the `src` string.
#[derive(Default)]
pub struct MemoryImageSource {
    images: HashMap<String, RgbaImage>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, src: impl Into<String>, image: RgbaImage) {
        self.images.insert(src.into(), image);
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, src: &str) -> Result<RgbaImage, RenderError> {
        self.images
            .get(src)
            .cloned()
            .ok_or_else(|| RenderError::ImageUnreadable {
                src: src.to_owned(),
                reason: "not present in memory source".to_owned(),
            })
    }
}

static FS_IMAGE_SOURCE: FsImageSource = FsImageSource;

/// Maps a (project, frame) pair to a pixel surface at the requested
/// width, height following the project's aspect preset.
pub struct FrameRenderer<'a> {
    fonts: &'a FontLibrary,
    images: &'a dyn ImageSource,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(fonts: &'a FontLibrary) -> Self {
        Self {
            fonts,
            images: &FS_IMAGE_SOURCE,
        }
    }

    pub fn with_image_source(fonts: &'a FontLibrary, images: &'a dyn ImageSource) -> Self {
        Self { fonts, images }
    }

    /// The pixel size a render at `target_width` will produce for the
    /// given preset.
    pub fn target_size(dimensions: Dimensions, target_width: u32) -> (u32, u32) {
        let scale = target_width as f32 / CANONICAL_WIDTH as f32;
        let height = (dimensions.height() as f32 * scale).round().max(1.0) as u32;
        (target_width, height)
    }

    /// Rasterizes one frame. Layer order, bottom to top: background
    /// color, background image (cover-fit), text inside the margin
    /// content rect, decorative elements in array order, signature
    /// overlay.
    pub fn render(
        &self,
        project: &Project,
        frame: &Frame,
        target_width: u32,
    ) -> Result<RgbaImage, RenderError> {
        if target_width == 0 {
            return Err(RenderError::InvalidTargetWidth);
        }
        let scale = target_width as f32 / CANONICAL_WIDTH as f32;
        let (width, height) = Self::target_size(project.dimensions, target_width);
        let mut canvas = RgbaImage::new(width, height);
        let full = ClipRect::full(&canvas);

        // 1. background color
        raster::fill(&mut canvas, style::resolved_background_color(frame, project).to_rgba8());

        // 2. background image, cover-fit over the whole canvas
        if let Some(src) = &frame.background_image {
            let bitmap = self.images.load(src)?;
            raster::draw_cover_fit(&mut canvas, full, &bitmap, 0.0, 0.0, width as f32, height as f32);
        }

        // 3. margin insets define the content rect
        let content = if project.margin_enabled {
            full.inset(
                (project.margin_horizontal as f32 * scale).round() as u32,
                (project.margin_vertical as f32 * scale).round() as u32,
            )
        } else {
            full
        };

        // 4. text block, clipped to the content rect
        if !frame.text.trim().is_empty() {
            let family = style::resolved_font_family(frame, project);
            let face = self.fonts.face(family, frame.is_bold, frame.is_italic)?;
            let block = text::TextBlockStyle {
                px: frame.font_size as f32 * scale,
                line_height: frame.line_height,
                letter_spacing: frame.letter_spacing * scale,
                align: frame.text_align,
                vertical_align: frame.vertical_align,
                underline: frame.is_underline,
                color: style::resolved_text_color(frame, project).to_rgba8(),
            };
            text::draw_text_block(&mut canvas, content, &frame.text, face, &block);
        }

        // 5. decorative elements, array order
        for element in &frame.elements {
            let (x, y, w, h) = element.bounds();
            let (x, y, w, h) = (x * scale, y * scale, w * scale, h * scale);
            match element {
                FrameElement::Image { src, .. } => {
                    let bitmap = self.images.load(src)?;
                    raster::draw_cover_fit(&mut canvas, full, &bitmap, x, y, w, h);
                }
                FrameElement::Shape { color, shape, .. } => match shape {
                    ShapeKind::Circle => {
                        raster::fill_circle(&mut canvas, full, x, y, w, h, color.to_rgba8())
                    }
                },
            }
        }

        // 6. signature overlay, always topmost
        if let Some(src) = &project.signature_image {
            let bitmap = self.images.load(src)?;
            let edge = project.signature_size as f32 * scale;
            let (x, y) = signature_origin(project, width as f32, height as f32, edge, scale);
            raster::draw_cover_fit(&mut canvas, full, &bitmap, x, y, edge, edge);
        }

        Ok(canvas)
    }
}

/// Top-left corner of the signature box for the configured anchor. The
/// box respects the margin insets when margins are enabled.
fn signature_origin(
    project: &Project,
    width: f32,
    height: f32,
    edge: f32,
    scale: f32,
) -> (f32, f32) {
    let (inset_x, inset_y) = if project.margin_enabled {
        (
            project.margin_horizontal as f32 * scale,
            project.margin_vertical as f32 * scale,
        )
    } else {
        (0.0, 0.0)
    };
    let x = match project.signature_position {
        SignaturePosition::TopLeft | SignaturePosition::BottomLeft => inset_x,
        SignaturePosition::TopCenter | SignaturePosition::BottomCenter => (width - edge) / 2.0,
        SignaturePosition::TopRight | SignaturePosition::BottomRight => width - inset_x - edge,
    };
    let y = match project.signature_position {
        SignaturePosition::TopLeft | SignaturePosition::TopCenter | SignaturePosition::TopRight => {
            inset_y
        }
        _ => height - inset_y - edge,
    };
    (x, y)
}
