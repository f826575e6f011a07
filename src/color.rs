//! Engine-neutral RGB color used by the parameter store.
//!
//! Colors are held in sRGB space with channels in `[0, 1]`, the way a color
//! picker presents them. Conversion to linear RGB happens only when a color
//! is copied into a uniform.

use std::fmt;
use std::str::FromStr;

/// Error returned when a `#rrggbb` string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}', expected #rrggbb")]
pub struct ColorParseError(pub String);

/// sRGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub fn from_u32(hex: u32) -> Self {
        Self::from_srgb8([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| ColorParseError(s.to_string()))
    }

    pub fn from_srgb8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    pub fn to_srgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Clamp every channel into `[0, 1]` (NaN channels become 0)
    pub fn clamped(self) -> Self {
        let clamp = |c: f32| if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) };
        Self::new(clamp(self.r), clamp(self.g), clamp(self.b))
    }

    /// Decode sRGB to linear RGB for shading
    pub fn to_linear(self) -> [f32; 3] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ]
    }

}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_srgb8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let c = Rgb::from_hex("#ffaa00").unwrap();
        assert_eq!(c.to_srgb8(), [0xff, 0xaa, 0x00]);
        assert_eq!(c.to_string(), "#ffaa00");

        let no_hash: Rgb = "00a3d7".parse().unwrap();
        assert_eq!(no_hash, Rgb::from_u32(0x00a3d7));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgb::from_hex("#ffa").is_err());
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#+fffff").is_err());
        assert!(Rgb::from_hex("-00000").is_err());
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(Rgb::BLACK.to_linear(), [0.0, 0.0, 0.0]);
        let white = Rgb::WHITE.to_linear();
        for c in white {
            assert!((c - 1.0).abs() < 1e-6);
        }
        // Mid grey is darker in linear space
        let grey = Rgb::new(0.5, 0.5, 0.5).to_linear();
        assert!(grey[0] < 0.5 && grey[0] > 0.2);
    }

    #[test]
    fn test_clamped() {
        let c = Rgb::new(-1.0, 2.0, f32::NAN).clamped();
        assert_eq!(c, Rgb::new(0.0, 1.0, 0.0));
    }
}
