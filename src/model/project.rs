use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::color::HexColor;
use super::frame::Frame;
use crate::util::time;

/// A project always holds between 1 and 10 frames inclusive.
pub const MIN_FRAMES: usize = 1;
pub const MAX_FRAMES: usize = 10;

/// Canonical export width shared by all presets.
pub const CANONICAL_WIDTH: u32 = 1080;

/// Errors from parsing a dimensions preset string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported dimensions {0:?}, expected 1080x1080, 1080x1350 or 1080x1920")]
pub struct DimensionsError(pub String);

/// Output aspect presets. Only these three are supported; anything else
/// read from a stored project is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dimensions {
    /// 1080x1080, square feed post
    #[default]
    Square,
    /// 1080x1350, 4:5 vertical
    Portrait,
    /// 1080x1920, 9:16 story
    Story,
}

impl Dimensions {
    pub const ALL: [Dimensions; 3] = [Dimensions::Square, Dimensions::Portrait, Dimensions::Story];

    pub fn width(self) -> u32 {
        CANONICAL_WIDTH
    }

    pub fn height(self) -> u32 {
        match self {
            Dimensions::Square => 1080,
            Dimensions::Portrait => 1350,
            Dimensions::Story => 1920,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimensions::Square => "1080x1080",
            Dimensions::Portrait => "1080x1350",
            Dimensions::Story => "1080x1920",
        }
    }
}

impl FromStr for Dimensions {
    type Err = DimensionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1080x1080" => Ok(Dimensions::Square),
            "1080x1350" => Ok(Dimensions::Portrait),
            "1080x1920" => Ok(Dimensions::Story),
            other => Err(DimensionsError(other.to_owned())),
        }
    }
}

impl TryFrom<String> for Dimensions {
    type Error = DimensionsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Dimensions> for String {
    fn from(d: Dimensions) -> String {
        d.as_str().to_owned()
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anchor for the signature overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignaturePosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl SignaturePosition {
    pub const ALL: [SignaturePosition; 6] = [
        SignaturePosition::TopLeft,
        SignaturePosition::TopCenter,
        SignaturePosition::TopRight,
        SignaturePosition::BottomLeft,
        SignaturePosition::BottomCenter,
        SignaturePosition::BottomRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SignaturePosition::TopLeft => "Top left",
            SignaturePosition::TopCenter => "Top center",
            SignaturePosition::TopRight => "Top right",
            SignaturePosition::BottomLeft => "Bottom left",
            SignaturePosition::BottomCenter => "Bottom center",
            SignaturePosition::BottomRight => "Bottom right",
        }
    }
}

/// An ordered collection of frames plus the project-wide defaults every
/// frame falls back to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub dimensions: Dimensions,

    pub background_color: HexColor,
    pub text_color: HexColor,
    pub font_family: String,

    pub margin_enabled: bool,
    pub margin_horizontal: u32,
    pub margin_vertical: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_image: Option<String>,
    pub signature_position: SignaturePosition,
    pub signature_size: u32,

    pub frames: Vec<Frame>,

    pub created_at: u64,
    pub updated_at: u64,
}

impl Project {
    /// A fresh project with one default frame.
    pub fn new(name: impl Into<String>) -> Self {
        let now = time::timestamp_secs();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            dimensions: Dimensions::default(),
            background_color: HexColor::white(),
            text_color: HexColor::black(),
            font_family: "Inter".to_owned(),
            margin_enabled: false,
            margin_horizontal: 64,
            margin_vertical: 64,
            signature_image: None,
            signature_position: SignaturePosition::default(),
            signature_size: 96,
            frames: vec![Frame::new()],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn frame(&self, id: Uuid) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    pub fn frame_mut(&mut self, id: Uuid) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id == id)
    }

    pub fn frame_index(&self, id: Uuid) -> Option<usize> {
        self.frames.iter().position(|f| f.id == id)
    }
}

/// Partial update for project-wide settings; `None` fields are left
/// untouched. Changing a global never rewrites frames that carry their
/// own override for the same field.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub background_color: Option<HexColor>,
    pub text_color: Option<HexColor>,
    pub font_family: Option<String>,
    pub margin_enabled: Option<bool>,
    pub margin_horizontal: Option<u32>,
    pub margin_vertical: Option<u32>,
    pub signature_image: Option<Option<String>>,
    pub signature_position: Option<SignaturePosition>,
    pub signature_size: Option<u32>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(dimensions) = self.dimensions {
            project.dimensions = dimensions;
        }
        if let Some(background_color) = self.background_color {
            project.background_color = background_color;
        }
        if let Some(text_color) = self.text_color {
            project.text_color = text_color;
        }
        if let Some(font_family) = self.font_family {
            project.font_family = font_family;
        }
        if let Some(margin_enabled) = self.margin_enabled {
            project.margin_enabled = margin_enabled;
        }
        if let Some(margin_horizontal) = self.margin_horizontal {
            project.margin_horizontal = margin_horizontal;
        }
        if let Some(margin_vertical) = self.margin_vertical {
            project.margin_vertical = margin_vertical;
        }
        if let Some(signature_image) = self.signature_image {
            project.signature_image = signature_image;
        }
        if let Some(signature_position) = self.signature_position {
            project.signature_position = signature_position;
        }
        if let Some(signature_size) = self.signature_size {
            project.signature_size = signature_size;
        }
    }
}
