//! Walks a calculator session through a few edits and prints the derived values.
//!
//! Run with: cargo run --example walkthrough [output-dir]

use projection_calculator::calc::FOOT_LAMBERT_PRESETS;
use projection_calculator::engine::{DeriveDirection, FieldEvent, ParameterState};
use projection_calculator::export::{CaptionFont, ParameterReport, ReportExporter, TestPattern, DEFAULT_PATTERN_NAME};
use projection_calculator::preview::ThrowDiagram;
use projection_calculator::{AspectRatioDescriptor, PropagationEngine};
use std::path::PathBuf;

fn print_state(label: &str, engine: &PropagationEngine) {
    let state: &ParameterState = engine.state();
    let ratio = AspectRatioDescriptor::describe(engine.reduce_aspect_ratio().as_ref());
    println!("== {}", label);
    println!(
        "  surface    {} x {} ({:.2} sq ft, {})",
        state.surface.width_raw,
        state.surface.height_raw,
        state.area_sq_ft(),
        ratio
    );
    println!(
        "  resolution {} x {} (locks w={} h={})",
        state.resolution.pixel_width,
        state.resolution.pixel_height,
        state.resolution.lock_width,
        state.resolution.lock_height
    );
    println!(
        "  throw      ratio {:.2}, distance {:.2} ft",
        state.geometry.throw_ratio, state.geometry.throw_distance_ft
    );
    println!(
        "  light      {} lm, gain {:.2}, {:.2} fL ({})",
        state.photometrics.lumens,
        state.photometrics.screen_gain,
        state.photometrics.foot_lamberts,
        state.brightness_rating().display_name()
    );
    match engine.compute_pixel_pitch() {
        Ok(pitch) => println!(
            "  pitch      {:.2} mm ({:.2} ppi), view from {:.2} ft",
            pitch.pixel_pitch_mm,
            pitch.ppi,
            engine.compute_viewing_distance().unwrap_or_default()
        ),
        Err(e) => println!("  pitch      n/a ({})", e),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("projection-calculator"));

    let mut engine = PropagationEngine::new();
    engine.subscribe(Box::new(|state: &ParameterState| {
        log::debug!(
            "Observed {}x{} px",
            state.resolution.pixel_width,
            state.resolution.pixel_height
        );
    }));
    print_state("defaults", &engine);

    engine.apply_field_edit(FieldEvent::LumensEdited(3072.0))?;
    print_state("lumens = 3072", &engine);

    engine.apply_field_edit(FieldEvent::WidthEdited("20ft".into()))?;
    print_state("width = 20ft", &engine);

    if let Err(e) = engine.apply_field_edit(FieldEvent::HeightEdited("nine feet".into())) {
        println!("== rejected edit: {}", e);
    }

    engine.apply_field_edit(FieldEvent::aspect_preset(
        "2.39:1",
        DeriveDirection::DeriveHeightFromWidth,
    ))?;
    print_state("preset 2.39:1 from width", &engine);

    for target in FOOT_LAMBERT_PRESETS {
        println!(
            "  {:>2} fL needs {:.0} lm",
            target,
            engine.lumens_for_target_foot_lamberts(target)?
        );
    }
    engine.apply_brightness_preset(FOOT_LAMBERT_PRESETS[1])?;
    print_state("brightness preset", &engine);

    if let Some(diagram) = ThrowDiagram::for_state(engine.state()) {
        for label in &diagram.labels {
            println!("  diagram label {:?} at {}", label.text, label.position);
        }
    }

    let pattern = TestPattern::from_state(DEFAULT_PATTERN_NAME, engine.state());
    let font = match CaptionFont::from_system_font() {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };
    let pattern_path = pattern.save(&output_dir, font.as_ref())?;
    println!("== wrote {}", pattern_path.display());

    let report_path = output_dir.join("report.json");
    ReportExporter::export_json(&ParameterReport::from_state(engine.state()), &report_path)?;
    println!("== wrote {}", report_path.display());

    Ok(())
}
