//! Test pattern generation at the calculated resolution.
//!
//! Layout: white field, red grid every quarter height, black circle spanning
//! the height, red frame and center cross, and a row of color bars below the
//! center. Caption lines are burned in with a caller-supplied font.

use super::font::CaptionFont;
use crate::calc::RatioReducer;
use crate::engine::ParameterState;
use anyhow::Context;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

/// Name used when the user has not entered one.
pub const DEFAULT_PATTERN_NAME: &str = "Test Pattern Name";

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const GREY: Rgb<u8> = Rgb([128, 128, 128]);

/// Color bars, left to right.
const BAR_COLORS: [Rgb<u8>; 8] = [
    WHITE,
    Rgb([255, 255, 0]),
    Rgb([0, 255, 255]),
    Rgb([0, 128, 0]),
    Rgb([255, 0, 255]),
    RED,
    Rgb([0, 0, 255]),
    BLACK,
];

const GRID_LINE: f32 = 2.0;
const CIRCLE_LINE: f32 = 5.0;
const FRAME_LINE: f32 = 10.0;
const BAR_OUTLINE: f32 = 2.0;

/// A named test pattern for one pixel resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TestPattern {
    name: String,
    pixel_width: u32,
    pixel_height: u32,
    labels: Vec<String>,
}

impl TestPattern {
    pub fn from_state(name: impl Into<String>, state: &ParameterState) -> Self {
        let name = name.into();
        let pixel_width = state.resolution.pixel_width;
        let pixel_height = state.resolution.pixel_height;

        let aspect = RatioReducer::reduce_pixels(pixel_width, pixel_height)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let pitch = state
            .pixel_pitch()
            .map(|p| format!("{:.2}", p.pixel_pitch_mm))
            .unwrap_or_else(|_| "n/a".to_string());

        let labels = vec![
            name.clone(),
            format!("{}px x {}px", pixel_width, pixel_height),
            format!("Aspect Ratio: {}", aspect),
            format!("Pixel Pitch: {} mm", pitch),
            format!(
                "Surface Dimension: {} x {}",
                state.surface.width_raw, state.surface.height_raw
            ),
        ];

        Self {
            name,
            pixel_width,
            pixel_height,
            labels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Caption lines: name, resolution, aspect ratio, pixel pitch, surface size.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// `Name_With_Underscores_1920x1080.png`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}x{}.png",
            self.name.replace(' ', "_"),
            self.pixel_width,
            self.pixel_height
        )
    }

    /// Render the pattern graphics at full resolution, without captions.
    pub fn render(&self) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.pixel_width, self.pixel_height, WHITE);
        let w = self.pixel_width as f32;
        let h = self.pixel_height as f32;

        // Grid
        let grid = h / 4.0;
        if grid > 0.0 {
            let cols = (w / grid).ceil() as u32;
            let rows = (h / grid).ceil() as u32;
            for col in 0..=cols {
                vertical_line(&mut img, col as f32 * grid, GRID_LINE, RED);
            }
            for row in 0..=rows {
                horizontal_line(&mut img, row as f32 * grid, GRID_LINE, RED);
            }
        }

        ring(&mut img, (w / 2.0, h / 2.0), h / 2.0, CIRCLE_LINE, BLACK);

        stroke_rect(&mut img, (0.0, 0.0), (w, h), FRAME_LINE, RED);
        vertical_line(&mut img, w / 2.0, FRAME_LINE, RED);
        horizontal_line(&mut img, h / 2.0, FRAME_LINE, RED);

        // Color bars
        let bar = h / 10.0;
        let bar_y = h / 2.0 + h / 6.0;
        let bar_x = (w - bar * BAR_COLORS.len() as f32) / 2.0;
        for (i, color) in BAR_COLORS.iter().enumerate() {
            let x = bar_x + i as f32 * bar;
            fill_rect(&mut img, (x, bar_y), (x + bar, bar_y + bar), *color);
            stroke_rect(&mut img, (x, bar_y), (x + bar, bar_y + bar), BAR_OUTLINE, GREY);
        }

        img
    }

    /// Render the pattern with its caption lines drawn in.
    ///
    /// Title lines use `ph/16`, detail lines half that, all centered horizontally.
    pub fn render_captioned(&self, font: &CaptionFont) -> RgbImage {
        let mut img = self.render();
        let w = self.pixel_width as f32;
        let h = self.pixel_height as f32;
        let fs = h / 16.0;

        let rows = [
            (h / 3.0, fs),
            (h / 2.3, fs),
            (h / 2.0 + fs, fs / 2.0),
            (h / 2.0 + 1.5 * fs, fs / 2.0),
            (h / 2.0 + 2.0 * fs, fs / 2.0),
        ];
        for (text, (y, size)) in self.labels.iter().zip(rows) {
            font.draw_centered(&mut img, text, (w / 2.0, y), size, BLACK);
        }
        img
    }

    /// Render and save into `dir`, returning the written path.
    ///
    /// Without a font the image is saved uncaptioned.
    pub fn save(&self, dir: &Path, font: Option<&CaptionFont>) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
        let path = dir.join(self.file_name());
        let img = match font {
            Some(font) => self.render_captioned(font),
            None => {
                log::warn!("No caption font, saving {} without captions", self.file_name());
                self.render()
            }
        };
        img.save(&path)
            .with_context(|| format!("Failed to save test pattern {:?}", path))?;
        log::info!("Exported test pattern: {}", self.file_name());
        Ok(path)
    }
}

/// Pixel index range whose centers fall in `[from, to)`, clamped to `limit`.
fn pixel_span(from: f32, to: f32, limit: u32) -> std::ops::Range<u32> {
    let start = (from - 0.5).ceil().clamp(0.0, limit as f32) as u32;
    let end = (to - 0.5).ceil().clamp(0.0, limit as f32) as u32;
    start..end.max(start)
}

fn fill_rect(img: &mut RgbImage, min: (f32, f32), max: (f32, f32), color: Rgb<u8>) {
    let xs = pixel_span(min.0, max.0, img.width());
    for y in pixel_span(min.1, max.1, img.height()) {
        for x in xs.clone() {
            img.put_pixel(x, y, color);
        }
    }
}

/// Outline centered on the rectangle edges.
fn stroke_rect(img: &mut RgbImage, min: (f32, f32), max: (f32, f32), line: f32, color: Rgb<u8>) {
    let half = line / 2.0;
    fill_rect(img, (min.0 - half, min.1 - half), (max.0 + half, min.1 + half), color);
    fill_rect(img, (min.0 - half, max.1 - half), (max.0 + half, max.1 + half), color);
    fill_rect(img, (min.0 - half, min.1 - half), (min.0 + half, max.1 + half), color);
    fill_rect(img, (max.0 - half, min.1 - half), (max.0 + half, max.1 + half), color);
}

fn vertical_line(img: &mut RgbImage, x: f32, line: f32, color: Rgb<u8>) {
    let h = img.height() as f32;
    fill_rect(img, (x - line / 2.0, 0.0), (x + line / 2.0, h), color);
}

fn horizontal_line(img: &mut RgbImage, y: f32, line: f32, color: Rgb<u8>) {
    let w = img.width() as f32;
    fill_rect(img, (0.0, y - line / 2.0), (w, y + line / 2.0), color);
}

fn ring(img: &mut RgbImage, center: (f32, f32), radius: f32, line: f32, color: Rgb<u8>) {
    let half = line / 2.0;
    let reach = radius + half;
    let xs = pixel_span(center.0 - reach, center.0 + reach + 1.0, img.width());
    for y in pixel_span(center.1 - reach, center.1 + reach + 1.0, img.height()) {
        for x in xs.clone() {
            let dx = x as f32 + 0.5 - center.0;
            let dy = y as f32 + 0.5 - center.1;
            if ((dx * dx + dy * dy).sqrt() - radius).abs() <= half {
                img.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{apply, FieldEvent};
    use crate::EngineConfig;

    fn small_state() -> ParameterState {
        let config = EngineConfig::default();
        let state = apply(&ParameterState::default(), &FieldEvent::PixelWidthEdited(160.0), &config).unwrap();
        apply(&state, &FieldEvent::PixelHeightEdited(90.0), &config).unwrap()
    }

    #[test]
    fn test_labels_and_file_name() {
        let pattern = TestPattern::from_state(DEFAULT_PATTERN_NAME, &ParameterState::default());
        assert_eq!(pattern.file_name(), "Test_Pattern_Name_1920x1080.png");
        assert_eq!(
            pattern.labels(),
            &[
                "Test Pattern Name".to_string(),
                "1920px x 1080px".to_string(),
                "Aspect Ratio: 16:9 (1.78:1)".to_string(),
                "Pixel Pitch: 2.54 mm".to_string(),
                "Surface Dimension: 16ft x 9ft".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_layout() {
        let state = small_state();
        assert_eq!((state.resolution.pixel_width, state.resolution.pixel_height), (160, 90));

        let img = TestPattern::from_state("Lobby", &state).render();
        assert_eq!(img.dimensions(), (160, 90));

        // Frame and center cross
        assert_eq!(*img.get_pixel(0, 0), RED);
        assert_eq!(*img.get_pixel(159, 89), RED);
        assert_eq!(*img.get_pixel(80, 20), RED);
        // Open field
        assert_eq!(*img.get_pixel(30, 30), WHITE);
        // Circle at 45 degrees up-left of center
        assert_eq!(*img.get_pixel(47, 12), BLACK);
        // Fourth bar (green); bars start at x = 44, y = 60, 9px square
        assert_eq!(*img.get_pixel(75, 64), Rgb([0, 128, 0]));
        // Bar outline
        assert_eq!(*img.get_pixel(75, 60), GREY);
    }

    #[test]
    fn test_save() {
        let dir = std::env::temp_dir().join(format!("projcalc_patterns_{}", std::process::id()));
        let pattern = TestPattern::from_state("Lobby Wall", &small_state());
        let path = pattern.save(&dir, None).unwrap();

        assert_eq!(path.file_name().unwrap(), "Lobby_Wall_160x90.png");
        assert_eq!(image::image_dimensions(&path).unwrap(), (160, 90));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_captions_burned_in() {
        let Ok(font) = CaptionFont::from_system_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let config = EngineConfig::default();
        let state = apply(&ParameterState::default(), &FieldEvent::PixelWidthEdited(320.0), &config).unwrap();
        let state = apply(&state, &FieldEvent::PixelHeightEdited(180.0), &config).unwrap();
        let pattern = TestPattern::from_state("Lobby", &state);

        let plain = pattern.render();
        let captioned = pattern.render_captioned(&font);
        assert_eq!(captioned.dimensions(), (320, 180));

        // Title row at ph/3 = 60, clear of the circle and red lines between x 100..220
        let dark = |img: &RgbImage| {
            (54..67).any(|y| (100..220).any(|x| img.get_pixel(x, y).0.iter().all(|c| *c < 100)))
        };
        assert!(!dark(&plain));
        assert!(dark(&captioned));

        // Detail row at ph/2 + 2fs = 112.5
        let changed = (108..118).any(|y| (0..320).any(|x| plain.get_pixel(x, y) != captioned.get_pixel(x, y)));
        assert!(changed);
    }

    #[test]
    fn test_save_with_font() {
        let Ok(font) = CaptionFont::from_system_font() else {
            return;
        };
        let dir = std::env::temp_dir().join(format!("projcalc_captioned_{}", std::process::id()));
        let pattern = TestPattern::from_state(DEFAULT_PATTERN_NAME, &small_state());
        let path = pattern.save(&dir, Some(&font)).unwrap();

        let saved = image::open(&path).unwrap().to_rgb8();
        let _ = std::fs::remove_dir_all(&dir);
        assert_eq!(saved, pattern.render_captioned(&font));
    }
}
