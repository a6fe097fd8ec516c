use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::color::HexColor;
use super::element::FrameElement;

/// Text shown in a frame that has not been edited yet.
pub const PLACEHOLDER_TEXT: &str = "Write something...";

/// Default typography for a freshly created frame.
pub const DEFAULT_FONT_SIZE: u32 = 24;
pub const DEFAULT_LINE_HEIGHT: f32 = 1.5;
pub const DEFAULT_LETTER_SPACING: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// One slide of a carousel.
///
/// Style fields typed `Option` fall back to the project-wide default
/// when unset; the resolution rule lives in [`crate::model::style`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: Uuid,
    pub text: String,

    pub font_size: u32,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub is_bold: bool,
    pub is_italic: bool,
    pub is_underline: bool,
    pub line_height: f32,
    pub letter_spacing: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,

    #[serde(default)]
    pub elements: Vec<FrameElement>,
}

impl Frame {
    /// A frame with placeholder text, default typography and no style
    /// overrides, so it renders with the project-wide defaults.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            text: PLACEHOLDER_TEXT.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            text_align: TextAlign::default(),
            vertical_align: VerticalAlign::default(),
            is_bold: false,
            is_italic: false,
            is_underline: false,
            line_height: DEFAULT_LINE_HEIGHT,
            letter_spacing: DEFAULT_LETTER_SPACING,
            font_family: None,
            background_color: None,
            text_color: None,
            background_image: None,
            elements: Vec::new(),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update for [`Frame`]; `None` fields are left untouched.
///
/// The double-`Option` on the fallback fields distinguishes "don't
/// touch" (`None`) from "clear the override" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct FramePatch {
    pub text: Option<String>,
    pub font_size: Option<u32>,
    pub text_align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub is_bold: Option<bool>,
    pub is_italic: Option<bool>,
    pub is_underline: Option<bool>,
    pub line_height: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub font_family: Option<Option<String>>,
    pub background_color: Option<Option<HexColor>>,
    pub text_color: Option<Option<HexColor>>,
    pub background_image: Option<Option<String>>,
}

impl FramePatch {
    pub fn apply(self, frame: &mut Frame) {
        if let Some(text) = self.text {
            frame.text = text;
        }
        if let Some(font_size) = self.font_size {
            frame.font_size = font_size;
        }
        if let Some(text_align) = self.text_align {
            frame.text_align = text_align;
        }
        if let Some(vertical_align) = self.vertical_align {
            frame.vertical_align = vertical_align;
        }
        if let Some(is_bold) = self.is_bold {
            frame.is_bold = is_bold;
        }
        if let Some(is_italic) = self.is_italic {
            frame.is_italic = is_italic;
        }
        if let Some(is_underline) = self.is_underline {
            frame.is_underline = is_underline;
        }
        if let Some(line_height) = self.line_height {
            frame.line_height = line_height;
        }
        if let Some(letter_spacing) = self.letter_spacing {
            frame.letter_spacing = letter_spacing;
        }
        if let Some(font_family) = self.font_family {
            frame.font_family = font_family;
        }
        if let Some(background_color) = self.background_color {
            frame.background_color = background_color;
        }
        if let Some(text_color) = self.text_color {
            frame.text_color = text_color;
        }
        if let Some(background_image) = self.background_image {
            frame.background_image = background_image;
        }
    }
}
