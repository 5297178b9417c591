/// RGB colors and `#rrggbb` parsing
use nom::{
    bytes::complete::{tag, take_while_m_n},
    combinator::{all_consuming, map_res},
    sequence::{preceded, tuple},
    IResult,
};
use serde::Deserialize;
use std::fmt;

use crate::error::VizTwinError;

/// An opaque RGB color. Transparency is carried separately by the draw
/// commands that use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` string (case insensitive)
    pub fn from_hex(input: &str) -> Result<Self, VizTwinError> {
        match all_consuming(parse_hex_color)(input.trim()) {
            Ok((_, color)) => Ok(color),
            Err(_) => Err(VizTwinError::InvalidColor(input.to_string())),
        }
    }

    /// CSS form, e.g. `#3c73ad`
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = VizTwinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

fn hex_channel(input: &str) -> IResult<&str, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |s| {
        u8::from_str_radix(s, 16)
    })(input)
}

fn parse_hex_color(input: &str) -> IResult<&str, Color> {
    let (input, (r, g, b)) = preceded(tag("#"), tuple((hex_channel, hex_channel, hex_channel)))(input)?;
    Ok((input, Color::rgb(r, g, b)))
}

/// Palette used across the viewer and pages
pub mod palette {
    use super::Color;

    pub const DEEP_BLUE: Color = Color::rgb(0x2a, 0x5a, 0x8a);
    pub const BRAND_BLUE: Color = Color::rgb(0x3c, 0x73, 0xad);
    pub const SKY: Color = Color::rgb(0xae, 0xe1, 0xfe);
    pub const SKY_HIGHLIGHT: Color = Color::rgb(0x00, 0x88, 0xff);
    pub const BLUSH: Color = Color::rgb(0xff, 0xe2, 0xee);
    pub const BLUSH_HIGHLIGHT: Color = Color::rgb(0xff, 0xb8, 0xd0);
    pub const SAND: Color = Color::rgb(0xf3, 0xee, 0xe8);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const AMBER: Color = Color::rgb(0xff, 0xb8, 0x00);
    pub const CYAN: Color = Color::rgb(0x00, 0xd9, 0xff);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::from_hex("#3C73AD").unwrap(), palette::BRAND_BLUE);
        assert_eq!(Color::from_hex("#aee1fe").unwrap(), palette::SKY);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Color::from_hex("3C73AD").is_err());
        assert!(Color::from_hex("#3C73A").is_err());
        assert!(Color::from_hex("#3C73ADFF").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(palette::AMBER.to_hex(), "#ffb800");
    }
}
