//! Snapshot of every calculator field.

use crate::calc::{
    self, parse_dimension, round2, AspectRatioDescriptor, BrightnessRating, Length, PixelPitch,
    RatioReducer,
};
use crate::config::{EngineCapabilities, SessionDefaults};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Pixel axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Width,
    Height,
}

/// Physical surface, as typed and as parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSpec {
    /// Last accepted width text.
    pub width_raw: String,
    /// Last accepted height text.
    pub height_raw: String,
    pub width: Length,
    pub height: Length,
}

impl SurfaceSpec {
    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width.inches() / self.height.inches()
    }
}

/// Pixel resolution and per-axis locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Pixel width is pinned; surface and pixel-height edits leave it alone.
    pub lock_width: bool,
    /// Pixel height is pinned; surface and pixel-width edits leave it alone.
    pub lock_height: bool,
}

impl Resolution {
    pub fn is_locked(&self, axis: Axis) -> bool {
        match axis {
            Axis::Width => self.lock_width,
            Axis::Height => self.lock_height,
        }
    }
}

/// Projector placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionGeometry {
    /// Throw distance divided by surface width.
    pub throw_ratio: f64,
    /// Lens-to-surface distance in feet, 2 decimals.
    pub throw_distance_ft: f64,
}

/// Brightness inputs and the derived luminance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Photometrics {
    pub lumens: f64,
    pub screen_gain: f64,
    /// Always derived from lumens, gain and area.
    pub foot_lamberts: f64,
}

/// Every field of the calculator. Replaced wholesale on each accepted edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterState {
    pub surface: SurfaceSpec,
    pub resolution: Resolution,
    pub geometry: ProjectionGeometry,
    pub photometrics: Photometrics,
}

impl Default for ParameterState {
    fn default() -> Self {
        Self {
            surface: SurfaceSpec {
                width_raw: "16ft".to_string(),
                height_raw: "9ft".to_string(),
                width: Length::from_feet(16.0),
                height: Length::from_feet(9.0),
            },
            resolution: Resolution {
                pixel_width: 1920,
                pixel_height: 1080,
                lock_width: false,
                lock_height: true,
            },
            geometry: ProjectionGeometry {
                throw_ratio: 1.5,
                throw_distance_ft: 24.0,
            },
            photometrics: Photometrics {
                lumens: 0.0,
                screen_gain: 1.0,
                foot_lamberts: 0.0,
            },
        }
    }
}

impl ParameterState {
    /// Build a starting snapshot from configured defaults.
    ///
    /// Throw distance and foot-lamberts are derived, never taken from config.
    /// Without the screen gain capability the gain is pinned to 1.0.
    pub fn from_defaults(
        defaults: &SessionDefaults,
        capabilities: &EngineCapabilities,
    ) -> Result<Self, EngineError> {
        let width = parse_dimension(&defaults.width)?;
        let height = parse_dimension(&defaults.height)?;
        if !width.is_positive() || !height.is_positive() {
            return Err(EngineError::DegenerateGeometry("surface dimension is zero"));
        }
        if defaults.pixel_width == 0 {
            return Err(EngineError::OutOfRange {
                field: "pixel width",
                value: 0.0,
            });
        }
        if defaults.pixel_height == 0 {
            return Err(EngineError::OutOfRange {
                field: "pixel height",
                value: 0.0,
            });
        }
        let throw_ratio = non_negative("throw ratio", defaults.throw_ratio)?;
        let lumens = non_negative("lumens", defaults.lumens)?;
        let screen_gain = if capabilities.has_screen_gain {
            non_negative("screen gain", defaults.screen_gain)?
        } else {
            1.0
        };

        let area = calc::area_sq_ft(width, height);
        Ok(Self {
            surface: SurfaceSpec {
                width_raw: defaults.width.clone(),
                height_raw: defaults.height.clone(),
                width,
                height,
            },
            resolution: Resolution {
                pixel_width: defaults.pixel_width,
                pixel_height: defaults.pixel_height,
                lock_width: defaults.lock_width,
                lock_height: defaults.lock_height,
            },
            geometry: ProjectionGeometry {
                throw_ratio,
                throw_distance_ft: round2(width.feet() * throw_ratio),
            },
            photometrics: Photometrics {
                lumens,
                screen_gain,
                foot_lamberts: calc::foot_lamberts(lumens, screen_gain, area)?,
            },
        })
    }

    /// Projected area in square feet.
    pub fn area_sq_ft(&self) -> f64 {
        calc::area_sq_ft(self.surface.width, self.surface.height)
    }

    /// Reduced surface aspect ratio.
    pub fn aspect_ratio(&self) -> Option<AspectRatioDescriptor> {
        RatioReducer::reduce(self.surface.width, self.surface.height)
    }

    pub fn pixel_pitch(&self) -> Result<PixelPitch, EngineError> {
        calc::pixel_pitch(self.surface.width, self.resolution.pixel_width)
    }

    /// Closest viewing distance in feet.
    pub fn viewing_distance_ft(&self) -> Result<f64, EngineError> {
        Ok(calc::viewing_distance_ft(&self.pixel_pitch()?))
    }

    pub fn brightness_rating(&self) -> BrightnessRating {
        BrightnessRating::classify(self.photometrics.foot_lamberts)
    }

    /// Lumens that would produce `target_fl` on this surface.
    pub fn lumens_for_target_foot_lamberts(&self, target_fl: f64) -> Result<f64, EngineError> {
        calc::lumens_for_target_foot_lamberts(target_fl, self.area_sq_ft())
    }
}

/// Reject negative and non-finite numeric inputs.
pub(super) fn non_negative(field: &'static str, value: f64) -> Result<f64, EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::OutOfRange { field, value });
    }
    Ok(value)
}
