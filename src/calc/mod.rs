//! Pure calculators: dimension parsing, ratio reduction, photometrics and pixel pitch.

mod dimension;
mod photometric;
mod pixel_pitch;
mod ratio;

pub use dimension::{parse_dimension, Length, MM_TO_INCHES};
pub use photometric::{
    area_sq_ft, foot_lamberts, lumens_for_target_foot_lamberts, BrightnessRating,
    FOOT_LAMBERT_PRESETS,
};
pub use pixel_pitch::{pixel_pitch, viewing_distance_ft, PixelPitch, FEET_PER_METER};
pub use ratio::{
    gcd, AspectRatioDescriptor, IntegerRatio, PresetRatio, RatioReducer, StandardRatio,
    STANDARD_RATIO_TOLERANCE,
};

/// Round to two decimal places, the display precision of every physical measure.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(21.333333), 21.33);
        assert_eq!(round2(8.3333336), 8.33);
        assert_eq!(round2(30.0), 30.0);
        assert_eq!(round2(1.5625), 1.56);
    }
}
