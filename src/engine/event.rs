//! Field edit events.

use super::state::Axis;
use serde::{Deserialize, Serialize};

/// Which surface side an aspect preset recomputes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeriveDirection {
    /// Keep the width, recompute the height.
    DeriveHeightFromWidth,
    /// Keep the height, recompute the width.
    DeriveWidthFromHeight,
}

/// One user edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldEvent {
    WidthEdited(String),
    HeightEdited(String),
    /// Fractional values are rounded to whole pixels.
    PixelWidthEdited(f64),
    PixelHeightEdited(f64),
    ThrowRatioEdited(f64),
    /// Distance in feet.
    ThrowDistanceEdited(f64),
    LumensEdited(f64),
    ScreenGainEdited(f64),
    LockToggled(Axis, bool),
    /// `ratio` is `<w>:<h>`, e.g. `"16:9"` or `"1.85:1"`.
    AspectPresetApplied {
        ratio: String,
        direction: DeriveDirection,
    },
}

impl FieldEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            FieldEvent::WidthEdited(_) => "width",
            FieldEvent::HeightEdited(_) => "height",
            FieldEvent::PixelWidthEdited(_) => "pixel width",
            FieldEvent::PixelHeightEdited(_) => "pixel height",
            FieldEvent::ThrowRatioEdited(_) => "throw ratio",
            FieldEvent::ThrowDistanceEdited(_) => "throw distance",
            FieldEvent::LumensEdited(_) => "lumens",
            FieldEvent::ScreenGainEdited(_) => "screen gain",
            FieldEvent::LockToggled(..) => "lock",
            FieldEvent::AspectPresetApplied { .. } => "aspect preset",
        }
    }

    /// Aspect preset event for `ratio`.
    pub fn aspect_preset(ratio: impl Into<String>, direction: DeriveDirection) -> Self {
        FieldEvent::AspectPresetApplied {
            ratio: ratio.into(),
            direction,
        }
    }
}
