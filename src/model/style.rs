//! The frame-over-project fallback rule, kept in one place so render
//! code never re-implements it with scattered `unwrap_or`s.

use super::color::HexColor;
use super::frame::Frame;
use super::project::Project;

/// Effective background color: frame override, else project global.
pub fn resolved_background_color<'a>(frame: &'a Frame, project: &'a Project) -> &'a HexColor {
    frame.background_color.as_ref().unwrap_or(&project.background_color)
}

/// Effective text color: frame override, else project global.
pub fn resolved_text_color<'a>(frame: &'a Frame, project: &'a Project) -> &'a HexColor {
    frame.text_color.as_ref().unwrap_or(&project.text_color)
}

/// Effective font family: frame override, else project global.
pub fn resolved_font_family<'a>(frame: &'a Frame, project: &'a Project) -> &'a str {
    frame.font_family.as_deref().unwrap_or(&project.font_family)
}

/// All three effective values for one frame, resolved together.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveStyle {
    pub background_color: HexColor,
    pub text_color: HexColor,
    pub font_family: String,
}

impl EffectiveStyle {
    pub fn resolve(frame: &Frame, project: &Project) -> Self {
        Self {
            background_color: resolved_background_color(frame, project).clone(),
            text_color: resolved_text_color(frame, project).clone(),
            font_family: resolved_font_family(frame, project).to_owned(),
        }
    }
}
