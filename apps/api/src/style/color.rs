use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    /// Track color behind skill indicators (Tailwind gray-200).
    pub const TRACK: Rgb = Rgb::new(0xE5, 0xE7, 0xEB);
    /// Secondary text such as dates and issuers (Tailwind gray-600).
    pub const MUTED: Rgb = Rgb::new(0x4B, 0x55, 0x63);
    /// Inactive rating dots (Tailwind gray-300).
    pub const INACTIVE: Rgb = Rgb::new(0xD1, 0xD5, 0xDB);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `#RGB` (leading `#` optional, case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => Some(Self::new(
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            )),
            3 => {
                let mut channels = digits
                    .chars()
                    .map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
                Some(Self::new(
                    channels.next()??,
                    channels.next()??,
                    channels.next()??,
                ))
            }
            _ => None,
        }
    }

    /// Linear blend toward `other`; `t = 0.0` keeps `self`, `t = 1.0` yields `other`.
    pub fn mix(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#4F46E5"), Some(Rgb::new(0x4F, 0x46, 0xE5)));
        assert_eq!(Rgb::from_hex("4f46e5"), Some(Rgb::new(0x4F, 0x46, 0xE5)));
        assert_eq!(Rgb::from_hex("#fff"), Some(Rgb::WHITE));
    }

    #[test]
    fn test_rejects_malformed_hex() {
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#GGGGGG"), None);
        assert_eq!(Rgb::from_hex("red"), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Rgb::new(16, 185, 129).to_string(), "#10B981");
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Rgb::new(0, 0, 0);
        assert_eq!(a.mix(Rgb::WHITE, 0.0), a);
        assert_eq!(a.mix(Rgb::WHITE, 1.0), Rgb::WHITE);
        assert_eq!(a.mix(Rgb::WHITE, 0.5), Rgb::new(128, 128, 128));
    }
}
