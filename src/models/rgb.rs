//! RGB color handling for layout colors (key caps, legends, backlight).

// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color value parsed from a layout hex string.
///
/// Layout documents store colors as free-form strings and the decoder keeps
/// them verbatim. This type is the checked view that consumers (material
/// builders, previews) use once they actually need channel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports "#RRGGBB", "RRGGBB" and the three digit shorthand "#RGB"
    /// that the layout editor writes for its default colors (`#ccc`).
    ///
    /// # Examples
    ///
    /// ```
    /// use kle_keycaps::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    ///
    /// let color = RgbColor::from_hex("#ccc").unwrap();
    /// assert_eq!(color, RgbColor::new(0xcc, 0xcc, 0xcc));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if !digits.is_ascii() {
            anyhow::bail!("Invalid hex color '{hex}'. Expected ASCII hex digits");
        }

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, digit) in channels.iter_mut().zip(digits.chars()) {
                    let value = digit
                        .to_digit(16)
                        .context(format!("Invalid hex digit '{digit}' in color '{hex}'"))?
                        as u8;
                    *channel = value * 17;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16)
                    .context(format!("Invalid red channel in hex color '{hex}'"))?;
                let g = u8::from_str_radix(&digits[2..4], 16)
                    .context(format!("Invalid green channel in hex color '{hex}'"))?;
                let b = u8::from_str_radix(&digits[4..6], 16)
                    .context(format!("Invalid blue channel in hex color '{hex}'"))?;
                Ok(Self::new(r, g, b))
            }
            _ => anyhow::bail!(
                "Invalid hex color format '{hex}'. Expected 3 or 6 hex digits (RGB or RRGGBB)"
            ),
        }
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts to linear-light RGBA floats (alpha 1.0).
    ///
    /// Shader inputs expect linear values; the hex strings in layouts are sRGB.
    #[must_use]
    pub fn to_linear_rgba(&self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            1.0,
        ]
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = f32::from(channel) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
