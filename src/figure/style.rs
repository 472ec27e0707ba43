//! Colors and line styles shared by the figures

use plotters::style::RGBColor;

use crate::error::{PlotError, PlotResult};

pub const TAB_BLUE: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
pub const TAB_ORANGE: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
pub const TAB_GREEN: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);
pub const TAB_RED: RGBColor = RGBColor(0xd6, 0x27, 0x28);
pub const TAB_PURPLE: RGBColor = RGBColor(0x94, 0x67, 0xbd);
pub const TAB_BROWN: RGBColor = RGBColor(0x8c, 0x56, 0x4b);
pub const TAB_PINK: RGBColor = RGBColor(0xe3, 0x77, 0xc2);
pub const TAB_GRAY: RGBColor = RGBColor(0x7f, 0x7f, 0x7f);
pub const TAB_OLIVE: RGBColor = RGBColor(0xbc, 0xbd, 0x22);
pub const TAB_CYAN: RGBColor = RGBColor(0x17, 0xbe, 0xcf);

pub const GREEN: RGBColor = RGBColor(0x00, 0x80, 0x00);
pub const RED: RGBColor = RGBColor(0xff, 0x00, 0x00);
pub const BLUE: RGBColor = RGBColor(0x00, 0x00, 0xff);
pub const PURPLE: RGBColor = RGBColor(0x80, 0x00, 0x80);
pub const MAGENTA: RGBColor = RGBColor(0xff, 0x00, 0xff);
pub const GRAY: RGBColor = RGBColor(0x80, 0x80, 0x80);
pub const LIGHT_GRAY: RGBColor = RGBColor(0xbb, 0xbb, 0xbb);

/// Categorical cycle used for workloads, in table order.
/// Ten distinct colors, five repeats, then ten grays.
const WORKLOAD_PALETTE: [RGBColor; 25] = [
    TAB_BLUE, TAB_ORANGE, TAB_GREEN, TAB_PURPLE, TAB_BROWN, TAB_PINK,
    TAB_CYAN, TAB_GRAY, TAB_OLIVE, TAB_RED, TAB_BLUE, TAB_PURPLE, TAB_OLIVE,
    TAB_CYAN, TAB_ORANGE, LIGHT_GRAY, LIGHT_GRAY, LIGHT_GRAY, LIGHT_GRAY,
    LIGHT_GRAY, LIGHT_GRAY, LIGHT_GRAY, LIGHT_GRAY, LIGHT_GRAY, LIGHT_GRAY,
];

/// Color of the i-th workload, wrapping past the end of the palette
pub fn workload_color(i: usize) -> RGBColor {
    WORKLOAD_PALETTE[i % WORKLOAD_PALETTE.len()]
}

/// Parses a `#rrggbb` color
pub fn parse_hex_color(s: &str) -> PlotResult<RGBColor> {
    let invalid = || {
        PlotError::ConfigError(format!(
            "Invalid color: '{}'. Expected '#rrggbb'.",
            s
        ))
    };
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid())
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Font emphasis of a text
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Italic,
    Bold,
}

/// Stroke pattern of a line
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash and gap lengths in pixels, `None` for a solid line
    pub fn dash_pattern(&self) -> Option<(u32, u32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((12, 6)),
            LineStyle::Dotted => Some((3, 5)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1f77b4").unwrap(), TAB_BLUE);
        assert_eq!(parse_hex_color("#FF7F0E").unwrap(), TAB_ORANGE);
        assert!(parse_hex_color("1f77b4").is_err());
        assert!(parse_hex_color("#1f77b").is_err());
        assert!(parse_hex_color("#1f77bz").is_err());
        assert!(parse_hex_color("#ü1f77b").is_err());
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(workload_color(0), TAB_BLUE);
        assert_eq!(workload_color(9), TAB_RED);
        assert_eq!(workload_color(15), LIGHT_GRAY);
        assert_eq!(workload_color(25), workload_color(0));
    }
}
