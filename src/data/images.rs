//! Bitmap decoding for the built-in image datasets.

use std::path::Path;

use anyhow::{Context, Result};

/// Pixel intensities below this are treated as background and zeroed.
const DARK_FLOOR: u8 = 75;

/// Decodes the bitmap at `path` into a flattened grayscale vector, row-major
/// top to bottom. The decoder resolves bottom-up versus top-down on-disk
/// storage, so the output orientation is always the same. Intensities below
/// the dark floor are clamped to zero, then everything is scaled to [0, 1].
pub fn load_grayscale(path: &Path) -> Result<Vec<f64>> {
    let img = image::open(path)
        .with_context(|| format!("image file not found or unreadable at {}", path.display()))?;
    let gray = img.to_luma8();
    Ok(normalize_pixels(gray.pixels().map(|p| p.0[0])))
}

fn normalize_pixels(pixels: impl Iterator<Item = u8>) -> Vec<f64> {
    pixels
        .map(|p| {
            let p = if p < DARK_FLOOR { 0 } else { p };
            p as f64 / 255.0
        })
        .collect()
}
