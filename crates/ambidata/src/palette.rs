//! State chart palette
//!
//! State charts color each data point by a numeric code. Code 0 means "no
//! color"; codes 1 to 64 index a fixed swatch table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color of a point on a state chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
#[allow(missing_docs)]
pub enum StateColor {
    #[default]
    None = 0,

    Black,
    DarkGrey3,
    DarkGrey2,
    DarkGrey1,
    LightGrey1,
    LightGrey2,
    LightGrey3,
    White,
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    LightRed3,
    LightOrange3,
    LightYellow3,
    LightGreen3,
    LightCyan3,
    LightBlue3,
    LightPurple3,
    LightPink3,
    LightRed2,
    LightOrange2,
    LightYellow2,
    LightGreen2,
    LightCyan2,
    LightBlue2,
    LightPurple2,
    LightPink2,
    LightRed1,
    LightOrange1,
    LightYellow1,
    LightGreen1,
    LightCyan1,
    LightBlue1,
    LightPurple1,
    LightPink1,
    DarkRed1,
    DarkOrange1,
    DarkYellow1,
    DarkGreen1,
    DarkCyan1,
    DarkBlue1,
    DarkPurple1,
    DarkPink1,
    DarkRed2,
    DarkOrange2,
    DarkYellow2,
    DarkGreen2,
    DarkCyan2,
    DarkBlue2,
    DarkPurple2,
    DarkPink2,
    DarkRed3,
    DarkOrange3,
    DarkYellow3,
    DarkGreen3,
    DarkCyan3,
    DarkBlue3,
    DarkPurple3,
    DarkPink3,
}

/// A code outside the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown state color code {0}")]
pub struct UnknownStateColor(pub u8);

const SWATCHES: [(StateColor, &str); 64] = [
    (StateColor::Black, "#000000"),
    (StateColor::DarkGrey3, "#444444"),
    (StateColor::DarkGrey2, "#666666"),
    (StateColor::DarkGrey1, "#999999"),
    (StateColor::LightGrey1, "#cccccc"),
    (StateColor::LightGrey2, "#eeeeee"),
    (StateColor::LightGrey3, "#f3f3f3"),
    (StateColor::White, "#ffffff"),
    (StateColor::Red, "#ff0000"),
    (StateColor::Orange, "#ff9900"),
    (StateColor::Yellow, "#ffff00"),
    (StateColor::Green, "#00ff00"),
    (StateColor::Cyan, "#00ffff"),
    (StateColor::Blue, "#0000ff"),
    (StateColor::Purple, "#9900ff"),
    (StateColor::Pink, "#ff00ff"),
    (StateColor::LightRed3, "#f4cccc"),
    (StateColor::LightOrange3, "#fce5cd"),
    (StateColor::LightYellow3, "#fff2cc"),
    (StateColor::LightGreen3, "#d9ead3"),
    (StateColor::LightCyan3, "#d0e0e3"),
    (StateColor::LightBlue3, "#cfe2f3"),
    (StateColor::LightPurple3, "#d9d2e9"),
    (StateColor::LightPink3, "#ead1dc"),
    (StateColor::LightRed2, "#ea9999"),
    (StateColor::LightOrange2, "#f9cb9c"),
    (StateColor::LightYellow2, "#ffe599"),
    (StateColor::LightGreen2, "#b6d7a8"),
    (StateColor::LightCyan2, "#a2c4c9"),
    (StateColor::LightBlue2, "#9fc5e8"),
    (StateColor::LightPurple2, "#b4a7d6"),
    (StateColor::LightPink2, "#d5a6bd"),
    (StateColor::LightRed1, "#e06666"),
    (StateColor::LightOrange1, "#f6b26b"),
    (StateColor::LightYellow1, "#ffd966"),
    (StateColor::LightGreen1, "#93c47d"),
    (StateColor::LightCyan1, "#76a5af"),
    (StateColor::LightBlue1, "#6fa8dc"),
    (StateColor::LightPurple1, "#8e7cc3"),
    (StateColor::LightPink1, "#c27ba0"),
    (StateColor::DarkRed1, "#cc0000"),
    (StateColor::DarkOrange1, "#e69138"),
    (StateColor::DarkYellow1, "#f1c232"),
    (StateColor::DarkGreen1, "#6aa84f"),
    (StateColor::DarkCyan1, "#45818e"),
    (StateColor::DarkBlue1, "#3d85c6"),
    (StateColor::DarkPurple1, "#674ea7"),
    (StateColor::DarkPink1, "#a64d79"),
    (StateColor::DarkRed2, "#990000"),
    (StateColor::DarkOrange2, "#b45f06"),
    (StateColor::DarkYellow2, "#bf9000"),
    (StateColor::DarkGreen2, "#38761d"),
    (StateColor::DarkCyan2, "#134f5c"),
    (StateColor::DarkBlue2, "#0b5394"),
    (StateColor::DarkPurple2, "#351c75"),
    (StateColor::DarkPink2, "#741b47"),
    (StateColor::DarkRed3, "#660000"),
    (StateColor::DarkOrange3, "#783f04"),
    (StateColor::DarkYellow3, "#7f6000"),
    (StateColor::DarkGreen3, "#274e13"),
    (StateColor::DarkCyan3, "#0c343d"),
    (StateColor::DarkBlue3, "#073763"),
    (StateColor::DarkPurple3, "#20124d"),
    (StateColor::DarkPink3, "#4c1130"),
];

impl StateColor {
    /// Numeric code as sent on the wire.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(StateColor::None),
            n => SWATCHES.get(usize::from(n) - 1).map(|(c, _)| *c),
        }
    }

    /// `#rrggbb` form, or `None` for [`StateColor::None`].
    pub fn hex(self) -> Option<&'static str> {
        match self.code() {
            0 => None,
            n => SWATCHES.get(usize::from(n) - 1).map(|(_, hex)| *hex),
        }
    }

    /// Opaque RGBA value, or `None` for [`StateColor::None`].
    pub fn rgba(self) -> Option<Rgba> {
        self.hex().and_then(Rgba::from_hex)
    }
}

impl TryFrom<u8> for StateColor {
    type Error = UnknownStateColor;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(UnknownStateColor(code))
    }
}

impl From<StateColor> for u8 {
    fn from(color: StateColor) -> Self {
        color.code()
    }
}

/// An 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha, 255 is opaque
    pub a: u8,
}

impl Rgba {
    /// Parse `#rrggbb` into an opaque color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: u8::MAX,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_table_matches_codes() {
        for (i, (color, _)) in SWATCHES.iter().enumerate() {
            assert_eq!(usize::from(color.code()), i + 1, "{color:?}");
            assert_eq!(StateColor::from_code(color.code()), Some(*color));
        }
    }

    #[rstest]
    #[case(StateColor::Black, "#000000", Rgba { r: 0, g: 0, b: 0, a: 255 })]
    #[case(StateColor::White, "#ffffff", Rgba { r: 255, g: 255, b: 255, a: 255 })]
    #[case(StateColor::Orange, "#ff9900", Rgba { r: 255, g: 153, b: 0, a: 255 })]
    #[case(StateColor::DarkPink3, "#4c1130", Rgba { r: 76, g: 17, b: 48, a: 255 })]
    fn test_lookup(#[case] color: StateColor, #[case] hex: &str, #[case] rgba: Rgba) {
        assert_eq!(color.hex(), Some(hex));
        assert_eq!(color.rgba(), Some(rgba));
    }

    #[test]
    fn test_none_has_no_color() {
        assert_eq!(StateColor::default(), StateColor::None);
        assert_eq!(StateColor::None.hex(), None);
        assert_eq!(StateColor::None.rgba(), None);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(StateColor::from_code(65), None);
        assert_eq!(StateColor::try_from(200u8), Err(UnknownStateColor(200)));
    }

    #[test]
    fn test_serde_as_code() {
        assert_eq!(serde_json::to_string(&StateColor::Red).unwrap(), "9");
        let c: StateColor = serde_json::from_str("64").unwrap();
        assert_eq!(c, StateColor::DarkPink3);
        assert!(serde_json::from_str::<StateColor>("65").is_err());
    }

    #[rstest]
    #[case("ff9900")]
    #[case("#ff99")]
    #[case("#gg9900")]
    #[case("#ff99000")]
    fn test_rgba_rejects_malformed(#[case] hex: &str) {
        assert_eq!(Rgba::from_hex(hex), None);
    }
}
