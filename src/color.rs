use std::str::FromStr;

use eframe::egui::Color32;
use palette::{named, Hsl, IntoColor, Srgb};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("unknown colour name '{0}'")]
    UnknownName(String),
    #[error("invalid hex colour '{0}'")]
    InvalidHex(String),
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parsing: CSS name / hex → Color32
// ---------------------------------------------------------------------------

/// Resolve a CSS/SVG colour name such as `"orange"`.
pub fn named_color(name: &str) -> Result<Color32, ColorError> {
    let rgb = named::from_str(&name.to_ascii_lowercase())
        .ok_or_else(|| ColorError::UnknownName(name.to_string()))?;
    Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Parse `#rrggbb` (leading `#` optional).
pub fn hex_color(hex: &str) -> Result<Color32, ColorError> {
    let rgb =
        Srgb::<u8>::from_str(hex.trim()).map_err(|_| ColorError::InvalidHex(hex.to_string()))?;
    Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Resolve a constant table entry, falling back to grey with an error log.
pub fn resolve_or_gray(result: Result<Color32, ColorError>) -> Color32 {
    result.unwrap_or_else(|e| {
        log::error!("{e}");
        Color32::GRAY
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ALL_TIERS;
    use crate::data::composition::LAND_USE_COLORS;

    #[test]
    fn tier_colour_names_resolve() {
        assert_eq!(named_color("red"), Ok(Color32::from_rgb(255, 0, 0)));
        assert_eq!(named_color("orange"), Ok(Color32::from_rgb(255, 165, 0)));
        assert_eq!(named_color("green"), Ok(Color32::from_rgb(0, 128, 0)));
        for tier in ALL_TIERS {
            assert!(named_color(tier.style().color).is_ok());
        }
    }

    #[test]
    fn land_use_palette_parses() {
        let parsed: Vec<Color32> = LAND_USE_COLORS
            .iter()
            .map(|h| hex_color(h).unwrap())
            .collect();
        assert_eq!(
            parsed,
            vec![
                Color32::from_rgb(0xff, 0x99, 0x99),
                Color32::from_rgb(0x66, 0xb3, 0xff),
                Color32::from_rgb(0x99, 0xff, 0x99),
                Color32::from_rgb(0xc2, 0xc2, 0xf0),
            ]
        );
    }

    #[test]
    fn bad_inputs_are_errors() {
        assert!(matches!(named_color("blurple"), Err(ColorError::UnknownName(_))));
        assert!(matches!(hex_color("#12"), Err(ColorError::InvalidHex(_))));
        assert_eq!(resolve_or_gray(hex_color("zz")), Color32::GRAY);
    }

    #[test]
    fn palette_has_distinct_entries() {
        let p = generate_palette(2);
        assert_eq!(p.len(), 2);
        assert_ne!(p[0], p[1]);
        assert!(generate_palette(0).is_empty());
    }
}
