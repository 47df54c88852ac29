//! Fixed display transform shared by the exposure synthesizer and the guided
//! upsampler.
//!
//! A pixel goes through: linear gain → filmic S-curve (per channel) → clamp to
//! `[0, 1]` → optional luminance reduction → square-root perceptual remap.
//! Both stages must use exactly the same chain, otherwise the guided
//! upsampler's multiplicative correction no longer refers to the same space
//! the blend was computed in.
use nalgebra::Vector3;

/// Luminance weights applied to tonemapped RGB. They sum to one.
pub const LUMA_WEIGHTS: [f32; 3] = [0.1, 0.7, 0.2];

/// Narkowicz fit of the ACES filmic curve, clamped to `[0, 1]`.
///
/// Negative and NaN inputs map to `0`.
#[inline]
pub fn filmic(x: f32) -> f32 {
    const A: f32 = 2.51;
    const B: f32 = 0.03;
    const C: f32 = 2.43;
    const D: f32 = 0.59;
    const E: f32 = 0.14;

    let x = x.max(0.0);
    // The curve crosses 1.0 near x ≈ 7.24 and stays above it; short-circuit
    // before `x * x` can overflow.
    if x >= 8.0 {
        return 1.0;
    }
    ((x * (A * x + B)) / (x * (C * x + D) + E)).clamp(0.0, 1.0)
}

/// Apply [`filmic`] to each channel after scaling by `gain`.
#[inline]
pub fn tonemap_rgb(rgb: Vector3<f32>, gain: f32) -> Vector3<f32> {
    (rgb * gain).map(filmic)
}

/// Weighted luminance of an RGB triple.
#[inline]
pub fn luminance(rgb: &Vector3<f32>) -> f32 {
    rgb.dot(&Vector3::from(LUMA_WEIGHTS))
}

/// Square-root perceptual remap, clamping negatives and NaN to zero first.
#[inline]
pub fn perceptual(v: f32) -> f32 {
    if v > 0.0 {
        v.sqrt()
    } else {
        0.0
    }
}

/// Perceptual luminance of `rgb` tonemapped at `gain`.
#[inline]
pub fn perceptual_luminance(rgb: [f32; 3], gain: f32) -> f32 {
    perceptual(luminance(&tonemap_rgb(Vector3::from(rgb), gain)))
}

/// Display-referred color of `rgb` tonemapped at `gain`, remapped per channel.
#[inline]
pub fn display_color(rgb: [f32; 3], gain: f32) -> [f32; 3] {
    tonemap_rgb(Vector3::from(rgb), gain).map(perceptual).into()
}
