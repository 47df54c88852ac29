//! Per-pixel preference among the synthetic exposures.
//!
//! Each exposure channel votes with a Gaussian falloff of its distance from
//! mid-gray, `exp(-0.5 · (lum - 0.5)² · σ²)`, and the three votes are
//! normalized to sum to one. Larger `σ` sharpens the preference.
use crate::image::{ImageRgbF32, ImageView, ImageViewMut, Rgb};

/// Target luminance an exposure is rewarded for approaching.
pub const MID_GRAY: f32 = 0.5;
/// Additive guard on weight denominators.
pub const WEIGHT_EPS: f32 = 1e-5;

/// Normalize a weight triple so it sums to one (up to [`WEIGHT_EPS`]).
#[inline]
pub fn normalize(w: Rgb) -> Rgb {
    let inv = 1.0 / (w[0] + w[1] + w[2] + WEIGHT_EPS);
    w.map(|v| v * inv)
}

/// Unnormalized well-exposedness of a single luminance value.
#[inline]
pub fn well_exposedness(lum: f32, sigma: f32) -> f32 {
    let d = lum - MID_GRAY;
    (-0.5 * d * d * sigma * sigma).exp()
}

/// Normalized weights for one packed exposure triple.
#[inline]
pub fn exposure_weights(lums: Rgb, sigma: f32) -> Rgb {
    normalize(lums.map(|l| well_exposedness(l, sigma)))
}

/// Fill `out` with normalized weights for every pixel of `exposures`.
pub fn compute_weights(exposures: &ImageRgbF32, sigma: f32, out: &mut ImageRgbF32) {
    assert_eq!(
        exposures.dimensions(),
        out.dimensions(),
        "weight buffer must match the exposure resolution"
    );
    out.fill_rows(|y, dst| {
        for (d, &lums) in dst.iter_mut().zip(exposures.row(y)) {
            *d = exposure_weights(lums, sigma);
        }
    });
}
