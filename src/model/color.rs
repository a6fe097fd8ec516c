use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a hex color string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    #[error("color must have 3, 6 or 8 hex digits: {0:?}")]
    BadLength(String),

    #[error("color contains a non-hex digit: {0:?}")]
    BadDigit(String),
}

/// A validated CSS-style hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
///
/// Stored in canonical lowercase `#rrggbb`/`#rrggbbaa` form so that a
/// serialized project round-trips to an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn white() -> Self {
        HexColor("#ffffff".to_owned())
    }

    pub fn black() -> Self {
        HexColor("#000000".to_owned())
    }

    /// The canonical string form, e.g. `#ff0000`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// RGBA bytes for the rasterizer. Alpha is 255 unless the color
    /// carries an explicit alpha channel.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let hex = &self.0[1..];
        let byte = |i: usize| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).unwrap_or(0);
        let a = if hex.len() == 8 { byte(3) } else { 255 };
        [byte(0), byte(1), byte(2), a]
    }

    pub fn to_color32(&self) -> egui::Color32 {
        let [r, g, b, a] = self.to_rgba8();
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn from_color32(color: egui::Color32) -> Self {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        if a == 255 {
            HexColor(format!("#{r:02x}{g:02x}{b:02x}"))
        } else {
            HexColor(format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
        }
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(hex) = s.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(s.to_owned()));
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_owned()));
        }
        match hex.len() {
            // #rgb expands to #rrggbb
            3 => {
                let mut out = String::with_capacity(7);
                out.push('#');
                for c in hex.chars() {
                    let c = c.to_ascii_lowercase();
                    out.push(c);
                    out.push(c);
                }
                Ok(HexColor(out))
            }
            6 | 8 => Ok(HexColor(format!("#{}", hex.to_ascii_lowercase()))),
            _ => Err(ColorParseError::BadLength(s.to_owned())),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> String {
        c.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
