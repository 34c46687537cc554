//! Screen luminance from projector output, screen gain and projected area.

use super::dimension::Length;
use super::round2;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Foot-lambert targets offered as brightness presets.
pub const FOOT_LAMBERT_PRESETS: [f64; 3] = [16.0, 32.0, 48.0];

/// Projected area in square feet.
pub fn area_sq_ft(width: Length, height: Length) -> f64 {
    width.feet() * height.feet()
}

/// Screen luminance in foot-lamberts, rounded to 2 decimals.
pub fn foot_lamberts(lumens: f64, gain: f64, area_sq_ft: f64) -> Result<f64, EngineError> {
    if !area_sq_ft.is_finite() || area_sq_ft <= 0.0 {
        return Err(EngineError::DegenerateGeometry("projected area is zero"));
    }
    Ok(round2(lumens * gain / area_sq_ft))
}

/// Lumens needed to reach `target_fl` on a unity-gain surface of `area_sq_ft`.
pub fn lumens_for_target_foot_lamberts(target_fl: f64, area_sq_ft: f64) -> Result<f64, EngineError> {
    if !area_sq_ft.is_finite() || area_sq_ft <= 0.0 {
        return Err(EngineError::DegenerateGeometry("projected area is zero"));
    }
    Ok(round2(target_fl * area_sq_ft))
}

/// Brightness band of a foot-lambert reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrightnessRating {
    /// No light output entered yet.
    Unset,
    /// Below 15 fL.
    TooDim,
    /// 16 to 50 fL, the cinema range.
    Optimal,
    /// 51 to 1000 fL.
    Bright,
    /// Outside every band.
    Unrated,
}

impl BrightnessRating {
    pub fn classify(foot_lamberts: f64) -> Self {
        if foot_lamberts == 0.0 {
            BrightnessRating::Unset
        } else if foot_lamberts < 15.0 {
            BrightnessRating::TooDim
        } else if (16.0..=50.0).contains(&foot_lamberts) {
            BrightnessRating::Optimal
        } else if (51.0..=1000.0).contains(&foot_lamberts) {
            BrightnessRating::Bright
        } else {
            BrightnessRating::Unrated
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            BrightnessRating::Unset => "Unset",
            BrightnessRating::TooDim => "Too dim",
            BrightnessRating::Optimal => "Optimal",
            BrightnessRating::Bright => "Bright",
            BrightnessRating::Unrated => "Unrated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area() {
        assert_eq!(area_sq_ft(Length::from_feet(16.0), Length::from_feet(9.0)), 144.0);
    }

    #[test]
    fn test_foot_lamberts() {
        assert_eq!(foot_lamberts(3072.0, 1.0, 144.0).unwrap(), 21.33);
        assert_eq!(foot_lamberts(3072.0, 1.3, 144.0).unwrap(), 27.73);
        assert_eq!(foot_lamberts(0.0, 1.0, 144.0).unwrap(), 0.0);
        assert!(matches!(
            foot_lamberts(1000.0, 1.0, 0.0),
            Err(EngineError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_lumens_for_target() {
        assert_eq!(lumens_for_target_foot_lamberts(16.0, 144.0).unwrap(), 2304.0);
        assert_eq!(lumens_for_target_foot_lamberts(48.0, 11.25 * 20.0).unwrap(), 10800.0);
        assert!(lumens_for_target_foot_lamberts(16.0, 0.0).is_err());
    }

    #[test]
    fn test_brightness_rating() {
        assert_eq!(BrightnessRating::classify(0.0), BrightnessRating::Unset);
        assert_eq!(BrightnessRating::classify(14.99), BrightnessRating::TooDim);
        assert_eq!(BrightnessRating::classify(15.5), BrightnessRating::Unrated);
        assert_eq!(BrightnessRating::classify(21.33), BrightnessRating::Optimal);
        assert_eq!(BrightnessRating::classify(50.5), BrightnessRating::Unrated);
        assert_eq!(BrightnessRating::classify(120.0), BrightnessRating::Bright);
        assert_eq!(BrightnessRating::classify(1500.0), BrightnessRating::Unrated);
    }
}
