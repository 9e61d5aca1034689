use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("hex color should be 6 characters long (RRGGBB), got {0:?}")]
    BadLength(String),
    #[error("invalid {channel} component in hex color {hex:?}")]
    BadChannel { channel: &'static str, hex: String },
}

/// Flat 8-bit RGB fill color of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts unit-range channels (as found in MTL `Kd` lines) to bytes.
    ///
    /// Each channel is scaled by 255 and truncated toward zero, so 0.5 becomes
    /// 0x7f. Values outside [0, 1] saturate to 0 or 255.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: (r * 255.0) as u8,
            g: (g * 255.0) as u8,
            b: (b * 255.0) as u8,
        }
    }

    /// Create a color from a hexadecimal string.
    /// Accepts formats like "#RRGGBB" or "RRGGBB".
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::BadLength(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>, channel: &'static str| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::BadChannel {
                channel,
                hex: hex.to_string(),
            })
        };

        Ok(Self::new(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_crossterm_color(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// 0x00RRGGBB, the pixel layout minifb expects.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::new(0x00, 0xFF, 0x00);
    pub const BLUE: Color = Color::new(0x00, 0x00, 0xFF);
    /// Debug color for faces whose material could not be resolved.
    pub const MISSING: Color = Color::new(0xFF, 0x57, 0x33);
}

impl Default for Color {
    fn default() -> Self {
        Color::MISSING
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
