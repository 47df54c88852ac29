//! I/O helpers for HDR input, LDR output and JSON reports.
//!
//! - `load_hdr_image`: decode any format the `image` crate understands into
//!   linear RGB floats. No color management is applied; integer formats are
//!   normalized to `[0, 1]` as stored.
//! - `save_rgb_f32`: write a display-referred `[0, 1]` RGB grid as 8-bit.
//! - `save_grayscale_f32`: write a scalar grid as an 8-bit grayscale image.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageRgbF32, ImageView};
use crate::error::{Error, Result};
use image::{GrayImage, Luma, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as linear RGB floats.
pub fn load_hdr_image(path: &Path) -> Result<ImageRgbF32> {
    let decoded = image::open(path)
        .map_err(|source| Error::Image {
            path: path.display().to_string(),
            source,
        })?
        .into_rgb32f();
    let width = decoded.width() as usize;
    let height = decoded.height() as usize;
    ImageRgbF32::from_interleaved(width, height, decoded.as_raw())
}

/// Save an RGB float image, clamping each channel to `[0, 1]` before
/// quantizing to 8 bits.
pub fn save_rgb_f32(image: &ImageRgbF32, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = RgbImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, image::Rgb(px.map(quantize)));
        }
    }
    out.save(path).map_err(|source| Error::Image {
        path: path.display().to_string(),
        source,
    })
}

/// Save a float image to a grayscale file, clamping values to `[0, 1]`.
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        let row = image.row(y);
        for (x, &px) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([quantize(px)]));
        }
    }
    out.save(path).map_err(|source| Error::Image {
        path: path.display().to_string(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| Error::Config {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}

#[inline]
fn quantize(v: f32) -> u8 {
    // NaN falls through `clamp` unchanged and saturates to 0 in the cast.
    (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    Ok(())
}
