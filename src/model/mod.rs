//! Data model for a carousel project: frames, decorative elements,
//! project-wide defaults and the style fallback rule.

pub mod color;
pub mod element;
pub mod frame;
pub mod project;
pub mod style;

pub use color::{ColorParseError, HexColor};
pub use element::{FrameElement, ShapeKind};
pub use frame::{Frame, FramePatch, TextAlign, VerticalAlign};
pub use project::{
    Dimensions, DimensionsError, Project, ProjectPatch, SignaturePosition, CANONICAL_WIDTH,
    MAX_FRAMES, MIN_FRAMES,
};
pub use style::EffectiveStyle;
