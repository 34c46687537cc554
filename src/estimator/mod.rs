//! Aspect ratio estimation from a rectangle drawn over a reference image.
//!
//! The image is shown scaled into a fixed canvas; the user drags a box over
//! the projection surface in the photo. The box's width/height becomes an
//! aspect preset edit like any other.

use crate::engine::{DeriveDirection, FieldEvent};
use anyhow::Context;
use glam::Vec2;
use std::path::Path;

/// Canvas the uploaded image is scaled into.
pub const CANVAS_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// Display size of an image scaled into [`CANVAS_SIZE`], preserving aspect.
///
/// Landscape images take the full canvas width; everything else the full height.
pub fn fit_to_canvas(image_width: u32, image_height: u32) -> Option<Vec2> {
    if image_width == 0 || image_height == 0 {
        return None;
    }

    let aspect = image_width as f32 / image_height as f32;
    if aspect > 1.0 {
        Some(Vec2::new(CANVAS_SIZE.x, CANVAS_SIZE.x / aspect))
    } else {
        Some(Vec2::new(CANVAS_SIZE.y * aspect, CANVAS_SIZE.y))
    }
}

/// Canvas size for an image file, reading only its header.
pub fn canvas_for_image(path: &Path) -> anyhow::Result<Vec2> {
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("Failed to read image dimensions from {:?}", path))?;
    fit_to_canvas(width, height).with_context(|| format!("Image {:?} has no pixels", path))
}

/// A drag rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectSelection {
    pub start: Vec2,
    pub end: Vec2,
}

impl RectSelection {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Absolute size of the selection.
    pub fn size(&self) -> Vec2 {
        (self.end - self.start).abs()
    }

    /// Width over height, rounded to 2 decimals. `None` for a flat selection.
    pub fn estimated_ratio(&self) -> Option<f64> {
        let size = self.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        let ratio = size.x as f64 / size.y as f64;
        Some((ratio * 100.0).round() / 100.0)
    }

    /// Aspect preset edit carrying the estimate, e.g. `"1.85:1"`.
    pub fn to_event(&self, direction: DeriveDirection) -> Option<FieldEvent> {
        let ratio = self.estimated_ratio()?;
        log::debug!("Estimated aspect ratio {:.2}:1 from selection {:?}", ratio, self);
        Some(FieldEvent::aspect_preset(format!("{:.2}:1", ratio), direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PropagationEngine;

    #[test]
    fn test_fit_landscape_and_portrait() {
        assert!(fit_to_canvas(1600, 900).unwrap().abs_diff_eq(Vec2::new(800.0, 450.0), 0.01));
        assert!(fit_to_canvas(900, 1800).unwrap().abs_diff_eq(Vec2::new(300.0, 600.0), 0.01));
        assert_eq!(fit_to_canvas(1000, 1000).unwrap(), Vec2::new(600.0, 600.0));
        assert!(fit_to_canvas(0, 100).is_none());
    }

    #[test]
    fn test_selection_any_drag_direction() {
        let forward = RectSelection::new(Vec2::new(10.0, 10.0), Vec2::new(195.0, 110.0));
        let backward = RectSelection::new(Vec2::new(195.0, 110.0), Vec2::new(10.0, 10.0));
        assert_eq!(forward.estimated_ratio(), Some(1.85));
        assert_eq!(backward.estimated_ratio(), Some(1.85));
    }

    #[test]
    fn test_flat_selection() {
        let flat = RectSelection::new(Vec2::new(10.0, 50.0), Vec2::new(300.0, 50.0));
        assert!(flat.estimated_ratio().is_none());
        assert!(flat.to_event(DeriveDirection::DeriveHeightFromWidth).is_none());
    }

    #[test]
    fn test_estimate_feeds_engine() {
        let selection = RectSelection::new(Vec2::ZERO, Vec2::new(239.0, 100.0));
        let event = selection.to_event(DeriveDirection::DeriveHeightFromWidth).unwrap();
        assert_eq!(
            event,
            FieldEvent::aspect_preset("2.39:1", DeriveDirection::DeriveHeightFromWidth)
        );

        let mut engine = PropagationEngine::new();
        let state = engine.apply_field_edit(event).unwrap();
        assert_eq!(state.surface.height_raw, "6.69ft");
        assert_eq!(state.resolution.pixel_width, 1920);
        assert_eq!(state.resolution.pixel_height, 803);
    }

    #[test]
    fn test_canvas_for_image_file() {
        let path = std::env::temp_dir().join(format!("projcalc_estimator_{}.png", std::process::id()));
        image::RgbImage::new(64, 32).save(&path).unwrap();
        let canvas = canvas_for_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(canvas, Vec2::new(800.0, 400.0));
    }
}
