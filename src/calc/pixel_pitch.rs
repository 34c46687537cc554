//! Pixel pitch, PPI and closest viewing distance.

use super::dimension::{Length, MM_TO_INCHES};
use super::round2;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Meters to feet.
pub const FEET_PER_METER: f64 = 3.28084;

/// Spacing of the pixel grid across the surface width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPitch {
    /// Center-to-center spacing in millimeters, 2 decimals.
    pub pixel_pitch_mm: f64,
    /// Pixels per inch, computed from the rounded pitch.
    pub ppi: f64,
}

/// Pitch and PPI of `pixel_width` pixels spread over `width`.
pub fn pixel_pitch(width: Length, pixel_width: u32) -> Result<PixelPitch, EngineError> {
    if pixel_width == 0 {
        return Err(EngineError::DegenerateGeometry("pixel width is zero"));
    }
    if !width.is_positive() {
        return Err(EngineError::DegenerateGeometry("surface width is zero"));
    }

    let width_mm = width.inches() / MM_TO_INCHES;
    let pixel_pitch_mm = round2(width_mm / pixel_width as f64);
    if pixel_pitch_mm <= 0.0 {
        return Err(EngineError::DegenerateGeometry("pixel pitch rounds to zero"));
    }

    Ok(PixelPitch {
        pixel_pitch_mm,
        ppi: round2(25.4 / pixel_pitch_mm),
    })
}

/// Closest comfortable viewing distance in feet.
///
/// The pitch is in millimeters but is scaled by the meters-to-feet factor as
/// is; the result matches the figures the calculator has always displayed.
pub fn viewing_distance_ft(pitch: &PixelPitch) -> f64 {
    round2(pitch.pixel_pitch_mm * FEET_PER_METER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_surface_pitch() {
        let pitch = pixel_pitch(Length::from_feet(16.0), 1920).unwrap();
        assert_eq!(pitch.pixel_pitch_mm, 2.54);
        assert_eq!(pitch.ppi, 10.0);
        assert_eq!(viewing_distance_ft(&pitch), 8.33);
    }

    #[test]
    fn test_ppi_uses_rounded_pitch() {
        // 20ft / 1920px = 3.17499..mm
        let pitch = pixel_pitch(Length::from_feet(20.0), 1920).unwrap();
        assert_eq!(pitch.pixel_pitch_mm, 3.17);
        assert_eq!(pitch.ppi, round2(25.4 / 3.17));
    }

    #[test]
    fn test_degenerate_pitch() {
        assert!(pixel_pitch(Length::from_feet(16.0), 0).is_err());
        assert!(pixel_pitch(Length::from_inches(0.0), 1920).is_err());
        // 1mm across 1920 pixels rounds to 0.00
        assert!(pixel_pitch(Length::from_millimeters(1.0), 1920).is_err());
    }
}
