//! The propagation rule: one snapshot plus one edit gives the next snapshot.
//!
//! All recomputation happens on a copy. Any error discards the copy, so a
//! rejected edit never leaves a partially updated state behind.

use super::event::{DeriveDirection, FieldEvent};
use super::state::{non_negative, Axis, ParameterState};
use crate::calc::{self, parse_dimension, round2, Length, PresetRatio};
use crate::config::EngineConfig;
use crate::error::EngineError;

/// Apply one edit to `state`.
///
/// Re-applying the same event to the result yields the result again.
pub fn apply(
    state: &ParameterState,
    event: &FieldEvent,
    config: &EngineConfig,
) -> Result<ParameterState, EngineError> {
    let mut next = state.clone();

    match event {
        FieldEvent::WidthEdited(raw) => {
            next.surface.width = parse_surface_side(raw)?;
            next.surface.width_raw = raw.clone();
            refit_resolution(&mut next)?;
            refresh_throw_distance(&mut next);
            refresh_foot_lamberts(&mut next)?;
        }
        FieldEvent::HeightEdited(raw) => {
            next.surface.height = parse_surface_side(raw)?;
            next.surface.height_raw = raw.clone();
            refit_resolution(&mut next)?;
            refresh_throw_distance(&mut next);
            refresh_foot_lamberts(&mut next)?;
        }
        FieldEvent::PixelWidthEdited(value) => {
            let pixel_width = pixel_count("pixel width", *value)?;
            next.resolution.pixel_width = pixel_width;
            if !next.resolution.lock_height {
                next.resolution.pixel_height =
                    derive_pixels(pixel_width, 1.0 / next.surface.aspect())?;
            }
        }
        FieldEvent::PixelHeightEdited(value) => {
            let pixel_height = pixel_count("pixel height", *value)?;
            next.resolution.pixel_height = pixel_height;
            if !next.resolution.lock_width {
                next.resolution.pixel_width = derive_pixels(pixel_height, next.surface.aspect())?;
            }
        }
        FieldEvent::ThrowRatioEdited(ratio) => {
            next.geometry.throw_ratio = non_negative("throw ratio", *ratio)?;
            refresh_throw_distance(&mut next);
        }
        FieldEvent::ThrowDistanceEdited(distance_ft) => {
            let distance_ft = non_negative("throw distance", *distance_ft)?;
            let width_ft = next.surface.width.feet();
            if width_ft <= 0.0 {
                return Err(EngineError::DegenerateGeometry("surface width is zero"));
            }
            // Snap the distance to the rounded ratio so the two stay in step
            next.geometry.throw_ratio = round2(distance_ft / width_ft);
            refresh_throw_distance(&mut next);
        }
        FieldEvent::LumensEdited(lumens) => {
            next.photometrics.lumens = non_negative("lumens", *lumens)?;
            refresh_foot_lamberts(&mut next)?;
        }
        FieldEvent::ScreenGainEdited(gain) => {
            if !config.capabilities.has_screen_gain {
                return Err(EngineError::Unsupported("screen gain"));
            }
            next.photometrics.screen_gain = non_negative("screen gain", *gain)?;
            refresh_foot_lamberts(&mut next)?;
        }
        FieldEvent::LockToggled(axis, locked) => match axis {
            Axis::Width => next.resolution.lock_width = *locked,
            Axis::Height => next.resolution.lock_height = *locked,
        },
        FieldEvent::AspectPresetApplied { ratio, direction } => {
            apply_aspect_preset(&mut next, ratio, *direction, config)?;
        }
    }

    Ok(next)
}

/// Set one surface side from a preset ratio and reset the pixel grid to the baseline.
fn apply_aspect_preset(
    state: &mut ParameterState,
    ratio_text: &str,
    direction: DeriveDirection,
    config: &EngineConfig,
) -> Result<(), EngineError> {
    let ratio: PresetRatio = ratio_text.parse()?;
    if !config.capabilities.has_custom_aspect_presets && ratio.standard().is_none() {
        return Err(EngineError::Unsupported("custom aspect presets"));
    }

    let baseline = config.preset_baseline;
    match direction {
        DeriveDirection::DeriveHeightFromWidth => {
            let height = Length::from_inches(state.surface.width.inches() * ratio.height / ratio.width);
            let raw = height.format_feet();
            state.surface.height = parse_surface_side(&raw)?;
            state.surface.height_raw = raw;

            let pixel_width = pixel_count("preset pixel width", baseline.pixel_width as f64)?;
            state.resolution.pixel_width = pixel_width;
            state.resolution.pixel_height = derive_pixels(pixel_width, 1.0 / ratio.decimal())?;
        }
        DeriveDirection::DeriveWidthFromHeight => {
            let width = Length::from_inches(state.surface.height.inches() * ratio.width / ratio.height);
            let raw = width.format_feet();
            state.surface.width = parse_surface_side(&raw)?;
            state.surface.width_raw = raw;

            let pixel_height = pixel_count("preset pixel height", baseline.pixel_height as f64)?;
            state.resolution.pixel_height = pixel_height;
            state.resolution.pixel_width = derive_pixels(pixel_height, ratio.decimal())?;
            refresh_throw_distance(state);
        }
    }

    refresh_foot_lamberts(state)
}

/// Parse a surface side; zero lengths would make the area degenerate.
fn parse_surface_side(raw: &str) -> Result<Length, EngineError> {
    let length = parse_dimension(raw)?;
    if !length.is_positive() {
        return Err(EngineError::DegenerateGeometry("surface dimension is zero"));
    }
    Ok(length)
}

/// Refit unlocked pixel axes to the surface aspect.
///
/// Width is derived first, then height from the new width, which keeps the
/// result stable when the same edit is applied twice.
fn refit_resolution(state: &mut ParameterState) -> Result<(), EngineError> {
    let aspect = state.surface.aspect();
    let resolution = &mut state.resolution;

    if !resolution.lock_width {
        resolution.pixel_width = derive_pixels(resolution.pixel_height, aspect)?;
    }
    if !resolution.lock_height {
        resolution.pixel_height = derive_pixels(resolution.pixel_width, 1.0 / aspect)?;
    }
    Ok(())
}

fn refresh_throw_distance(state: &mut ParameterState) {
    state.geometry.throw_distance_ft = round2(state.surface.width.feet() * state.geometry.throw_ratio);
}

fn refresh_foot_lamberts(state: &mut ParameterState) -> Result<(), EngineError> {
    let photometrics = &mut state.photometrics;
    photometrics.foot_lamberts = calc::foot_lamberts(
        photometrics.lumens,
        photometrics.screen_gain,
        calc::area_sq_ft(state.surface.width, state.surface.height),
    )?;
    Ok(())
}

/// `anchor * factor` rounded to whole pixels.
fn derive_pixels(anchor: u32, factor: f64) -> Result<u32, EngineError> {
    let derived = (anchor as f64 * factor).round();
    if !derived.is_finite() || derived < 1.0 || derived > u32::MAX as f64 {
        return Err(EngineError::DegenerateGeometry("derived pixel count out of range"));
    }
    Ok(derived as u32)
}

fn pixel_count(field: &'static str, value: f64) -> Result<u32, EngineError> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 1.0 || rounded > u32::MAX as f64 {
        return Err(EngineError::OutOfRange { field, value });
    }
    Ok(rounded as u32)
}
