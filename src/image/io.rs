//! I/O helpers for amplitude rasters and JSON reports.
//!
//! - `load_amplitude_raster`: read a grayscale PNG/TIFF into an `ImageF32`,
//!   keeping the stored amplitude values (8-bit, 16-bit or float samples).
//! - `save_normalized_f32`: min/max-stretch an `ImageF32` into an 8-bit PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! Geospatial metadata is not read here; the pixel size comes from the caller.
use super::{ImageF32, ImageView};
use image::{DynamicImage, GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a single-band raster from disk without rescaling its sample values.
///
/// Multi-channel inputs are reduced to luminance first.
pub fn load_amplitude_raster(path: &Path) -> Result<ImageF32, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let data: Vec<f32> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(f32::from).collect(),
        float @ (DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_)) => {
            float.to_luma32f().into_raw()
        }
        other => other.into_luma16().into_raw().into_iter().map(f32::from).collect(),
    };
    ImageF32::from_vec(width, height, data)
        .ok_or_else(|| format!("Decoded buffer of {} has unexpected size", path.display()))
}

/// Save a float raster to a grayscale PNG, stretching `[min, max]` to `[0, 255]`.
///
/// Constant rasters are written as mid-gray.
pub fn save_normalized_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (lo, hi) = image.min_max().unwrap_or((0.0, 0.0));
    let span = hi - lo;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = if span > 0.0 {
                ((px - lo) / span * 255.0).clamp(0.0, 255.0)
            } else {
                128.0
            };
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
