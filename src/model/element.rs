use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::color::HexColor;

/// Shape kinds a decorative overlay can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
}

/// A decorative overlay placed on a single frame.
///
/// Coordinates and sizes are in canonical 1080-wide pixel space; the
/// renderer scales them when drawing at another resolution. The variants
/// carry only the fields valid for their kind, so a shape without a
/// color or an image without a source cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FrameElement {
    Image {
        id: Uuid,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Data-URI or file path of the bitmap.
        src: String,
    },
    Shape {
        id: Uuid,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: HexColor,
        shape: ShapeKind,
    },
}

impl FrameElement {
    pub fn image(x: f32, y: f32, width: f32, height: f32, src: impl Into<String>) -> Self {
        FrameElement::Image {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            src: src.into(),
        }
    }

    pub fn circle(x: f32, y: f32, width: f32, height: f32, color: HexColor) -> Self {
        FrameElement::Shape {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            color,
            shape: ShapeKind::Circle,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            FrameElement::Image { id, .. } | FrameElement::Shape { id, .. } => *id,
        }
    }

    /// Bounding box as `(x, y, width, height)` in canonical pixels.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        match self {
            FrameElement::Image {
                x, y, width, height, ..
            }
            | FrameElement::Shape {
                x, y, width, height, ..
            } => (*x, *y, *width, *height),
        }
    }

    pub fn set_bounds(&mut self, nx: f32, ny: f32, nw: f32, nh: f32) {
        match self {
            FrameElement::Image {
                x, y, width, height, ..
            }
            | FrameElement::Shape {
                x, y, width, height, ..
            } => {
                *x = nx;
                *y = ny;
                *width = nw;
                *height = nh;
            }
        }
    }
}
