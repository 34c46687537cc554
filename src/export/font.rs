//! TrueType caption rendering with fontdue.

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Fonts tried by [`CaptionFont::from_system_font`], in order.
const SYSTEM_FONT_PATHS: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font used to burn caption lines into exported images.
pub struct CaptionFont {
    font: Font,
}

impl CaptionFont {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font: {}", e))?;
        Ok(Self { font })
    }

    /// Load a TrueType font file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        Self::from_bytes(data)
    }

    /// First common sans-serif font found on this machine.
    pub fn from_system_font() -> Result<Self> {
        for path in SYSTEM_FONT_PATHS {
            if let Ok(font) = Self::from_path(Path::new(path)) {
                log::debug!("Using caption font {}", path);
                return Ok(font);
            }
        }
        Err(anyhow::anyhow!(
            "Could not find a system font. Tried: {:?}",
            SYSTEM_FONT_PATHS
        ))
    }

    /// Width in pixels of `text` at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, size).advance_width)
            .sum()
    }

    /// Draw `text` centered on `center`, blending glyph coverage over the image.
    pub fn draw_centered(
        &self,
        img: &mut RgbImage,
        text: &str,
        center: (f32, f32),
        size: f32,
        color: Rgb<u8>,
    ) {
        if text.is_empty() || size <= 0.0 {
            return;
        }

        // Baseline sits so the ascent/descent span is centered vertically
        let baseline = match self.font.horizontal_line_metrics(size) {
            Some(line) => center.1 + (line.ascent + line.descent) * 0.5,
            None => center.1 + size * 0.35,
        };
        let mut pen_x = center.0 - self.text_width(text, size) * 0.5;

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, size);
            let left = (pen_x + metrics.xmin as f32).round() as i64;
            let top = (baseline - (metrics.height as i32 + metrics.ymin) as f32).round() as i64;

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let coverage = bitmap[gy * metrics.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let x = left + gx as i64;
                    let y = top + gy as i64;
                    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
                        continue;
                    }
                    blend(img.get_pixel_mut(x as u32, y as u32), color, coverage);
                }
            }
            pen_x += metrics.advance_width;
        }
    }
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont").finish_non_exhaustive()
    }
}

fn blend(pixel: &mut Rgb<u8>, color: Rgb<u8>, coverage: u8) {
    let a = coverage as f32 / 255.0;
    for (dst, src) in pixel.0.iter_mut().zip(color.0) {
        *dst = (*dst as f32 * (1.0 - a) + src as f32 * a).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(CaptionFont::from_bytes(b"not a font".to_vec()).is_err());
    }

    #[test]
    fn test_from_path_missing() {
        assert!(CaptionFont::from_path(Path::new("/nonexistent/font.ttf")).is_err());
    }

    #[test]
    fn test_blend() {
        let mut pixel = Rgb([255, 255, 255]);
        blend(&mut pixel, Rgb([0, 0, 0]), 255);
        assert_eq!(pixel, Rgb([0, 0, 0]));

        let mut pixel = Rgb([255, 0, 0]);
        blend(&mut pixel, Rgb([0, 0, 255]), 0);
        assert_eq!(pixel, Rgb([255, 0, 0]));
    }

    #[test]
    fn test_draw_centered() {
        let Ok(font) = CaptionFont::from_system_font() else {
            eprintln!("no system font available, skipping");
            return;
        };
        let mut img = RgbImage::from_pixel(200, 60, Rgb([255, 255, 255]));
        font.draw_centered(&mut img, "1920px x 1080px", (100.0, 30.0), 16.0, Rgb([0, 0, 0]));

        let inked: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!inked.is_empty());

        // Ink stays around the requested center
        let (min_x, max_x) = inked.iter().fold((u32::MAX, 0), |(lo, hi), (x, _)| (lo.min(*x), hi.max(*x)));
        let (min_y, max_y) = inked.iter().fold((u32::MAX, 0), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
        assert!(((min_x + max_x) as f32 / 2.0 - 100.0).abs() < 6.0);
        assert!(min_y > 10 && max_y < 50);
        assert!(font.text_width("1920px x 1080px", 16.0) > 50.0);
    }
}
