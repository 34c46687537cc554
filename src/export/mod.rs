//! Export of calculator results: test pattern images and parameter reports.

mod font;
mod pattern;

pub use font::CaptionFont;
pub use pattern::{TestPattern, DEFAULT_PATTERN_NAME};

use crate::calc::{viewing_distance_ft, AspectRatioDescriptor, BrightnessRating};
use crate::engine::ParameterState;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

/// Snapshot plus its derived views, for handing results to other tools.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename = "ProjectionReport")]
pub struct ParameterReport {
    pub state: ParameterState,
    /// Surface ratio as displayed, e.g. `"16:9 (1.78:1)"`.
    pub aspect_ratio: String,
    pub area_sq_ft: f64,
    pub pixel_pitch_mm: Option<f64>,
    pub ppi: Option<f64>,
    pub viewing_distance_ft: Option<f64>,
    pub brightness: BrightnessRating,
}

impl ParameterReport {
    pub fn from_state(state: &ParameterState) -> Self {
        let pitch = state.pixel_pitch().ok();
        Self {
            state: state.clone(),
            aspect_ratio: AspectRatioDescriptor::describe(state.aspect_ratio().as_ref()),
            area_sq_ft: state.area_sq_ft(),
            pixel_pitch_mm: pitch.map(|p| p.pixel_pitch_mm),
            ppi: pitch.map(|p| p.ppi),
            viewing_distance_ft: pitch.map(|p| viewing_distance_ft(&p)),
            brightness: state.brightness_rating(),
        }
    }
}

/// Writes reports to disk.
pub struct ReportExporter;

impl ReportExporter {
    /// Export report as pretty JSON.
    pub fn export_json(report: &ParameterReport, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
        log::info!("Exported parameter report: {:?}", path);
        Ok(())
    }

    /// Export report as XML.
    pub fn export_xml(report: &ParameterReport, path: &Path) -> anyhow::Result<()> {
        let xml = quick_xml::se::to_string(report)?;
        std::fs::write(path, xml).with_context(|| format!("Failed to write {:?}", path))?;
        log::info!("Exported parameter report: {:?}", path);
        Ok(())
    }
}
