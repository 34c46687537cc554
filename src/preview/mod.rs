//! Read-only layouts derived from a snapshot: the resolution preview and the
//! throw-distance diagram. Drawing them is left to the UI.

use crate::engine::{ParameterState, Resolution};
use glam::Vec2;

/// Side of the square resolution preview canvas.
pub const PREVIEW_SIZE: f32 = 200.0;

/// Side of the square throw diagram canvas.
pub const DIAGRAM_SIZE: f32 = 600.0;

/// Share of the diagram canvas the longest measure may occupy.
const DIAGRAM_FILL: f32 = 0.8;

/// Drawn thickness of the screen line.
const SCREEN_THICKNESS: f32 = 3.0;

/// Projector glyph size.
const PROJECTOR_SIZE: Vec2 = Vec2::new(20.0, 30.0);

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl CanvasRect {
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Text anchored at its center.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasLabel {
    pub text: String,
    pub position: Vec2,
}

/// Pixel grid shape fitted into the preview square.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    pub rect: CanvasRect,
    pub label: CanvasLabel,
}

impl PreviewLayout {
    pub fn for_resolution(resolution: &Resolution) -> Option<Self> {
        if resolution.pixel_width == 0 || resolution.pixel_height == 0 {
            return None;
        }

        let aspect = resolution.pixel_width as f32 / resolution.pixel_height as f32;
        let mut size = Vec2::new(PREVIEW_SIZE, PREVIEW_SIZE / aspect);
        if size.y > PREVIEW_SIZE {
            size = Vec2::new(PREVIEW_SIZE * aspect, PREVIEW_SIZE);
        }

        let origin = (Vec2::splat(PREVIEW_SIZE) - size) * 0.5;
        Some(Self {
            rect: CanvasRect { origin, size },
            label: CanvasLabel {
                text: format!("{}x{}", resolution.pixel_width, resolution.pixel_height),
                position: Vec2::splat(PREVIEW_SIZE * 0.5),
            },
        })
    }
}

/// Side view of projector, throw line and screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowDiagram {
    /// Canvas pixels per foot.
    pub scale: f32,
    /// Screen bar.
    pub screen: CanvasRect,
    /// Projector glyph above the screen.
    pub projector: CanvasRect,
    /// Lens position; the throw line and both cone edges start here.
    pub lens: Vec2,
    /// Where the dashed throw line meets the screen.
    pub throw_target: Vec2,
    /// Cone edges, lens to each screen corner.
    pub cone: [(Vec2, Vec2); 2],
    /// Throw ratio, throw distance and surface width captions.
    pub labels: Vec<CanvasLabel>,
}

impl ThrowDiagram {
    /// Lay out the diagram. `None` if neither distance nor width gives a scale.
    pub fn for_state(state: &ParameterState) -> Option<Self> {
        let distance_ft = state.geometry.throw_distance_ft as f32;
        let width_ft = state.surface.width.feet() as f32;

        let reach = DIAGRAM_SIZE * DIAGRAM_FILL;
        let scale = [distance_ft, width_ft]
            .into_iter()
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| reach / v)
            .reduce(f32::min)?;

        let center_x = DIAGRAM_SIZE * 0.5;
        let distance = distance_ft * scale;
        let screen_width = width_ft * scale;
        let screen_y = DIAGRAM_SIZE / 1.2 + 50.0;

        let lens = Vec2::new(center_x, screen_y - distance);
        let left = Vec2::new(center_x - screen_width * 0.5, screen_y);
        let right = Vec2::new(center_x + screen_width * 0.5, screen_y);

        let labels = vec![
            CanvasLabel {
                text: format!("Throw Ratio: {}", state.geometry.throw_ratio),
                position: Vec2::new(center_x, screen_y - distance + 20.0),
            },
            CanvasLabel {
                text: format!("Throw Distance: {:.2} ft", state.geometry.throw_distance_ft),
                position: Vec2::new(center_x, screen_y - distance * 0.5 + 40.0),
            },
            CanvasLabel {
                text: format!("Surface Width: {}", state.surface.width_raw),
                position: Vec2::new(center_x, screen_y + 20.0),
            },
        ];

        Some(Self {
            scale,
            screen: CanvasRect {
                origin: left,
                size: Vec2::new(screen_width, SCREEN_THICKNESS),
            },
            projector: CanvasRect {
                origin: lens - Vec2::new(PROJECTOR_SIZE.x * 0.5, PROJECTOR_SIZE.y),
                size: PROJECTOR_SIZE,
            },
            lens,
            throw_target: Vec2::new(center_x, screen_y),
            cone: [(lens, left), (lens, right)],
            labels,
        })
    }
}
