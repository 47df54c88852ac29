//! Guided upsampling of the blended luminance back to full resolution.
//!
//! The blend produces a luminance estimate at `display_mip`. Upsampling it
//! directly would blur edges, so each full-resolution pixel instead fits a
//! local affine model `accumulation ≈ A·guide + B` over a Gaussian-weighted
//! 3×3 neighbourhood of the display level. The guide is the neutral exposure
//! luminance at that level. Evaluating the model on the pixel's own
//! full-resolution luminance gives the target luminance, whose ratio to the
//! current luminance is applied as an exposure multiplier before the final
//! tonemap.
//!
//! Near-black pixels have an unreliable ratio; below [`DARK_THRESHOLD`] the
//! multiplier eases quadratically back towards 1.
use crate::exposure::MID;
use crate::image::{ImageF32, ImageRgbF32, ImageView, ImageViewMut};
use crate::pyramid::LevelScaling;
use crate::tonemap::{display_color, perceptual_luminance};

/// Spatial sigma (in display-level pixels) of the regression window.
pub const GUIDE_SIGMA: f32 = 0.7;
/// Lower bound on the guide variance used as the slope denominator.
pub const VARIANCE_EPS: f32 = 1e-4;
/// Guard on luminance denominators.
pub const LUMINANCE_EPS: f32 = 1e-5;
/// Luminance below which the multiplier fades towards 1.
pub const DARK_THRESHOLD: f32 = 0.007;

/// Local affine mapping from guide luminance to blended luminance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineFit {
    pub slope: f32,
    pub intercept: f32,
}

impl AffineFit {
    #[inline]
    pub fn eval(&self, guide: f32) -> f32 {
        self.slope * guide + self.intercept
    }
}

/// Normalized 3×3 Gaussian window, row-major from `(-1, -1)`.
pub fn guide_kernel() -> [f32; 9] {
    let mut k = [0.0f32; 9];
    let inv_two_sigma_sq = 1.0 / (2.0 * GUIDE_SIGMA * GUIDE_SIGMA);
    let mut sum = 0.0;
    for dy in -1i32..=1 {
        for dx in -1i32..=1 {
            let v = (-((dx * dx + dy * dy) as f32) * inv_two_sigma_sq).exp();
            k[((dy + 1) * 3 + dx + 1) as usize] = v;
            sum += v;
        }
    }
    k.map(|v| v / sum)
}

/// Weighted least-squares fit of `accumulation` against the guide channel
/// around display-level pixel `(cx, cy)`. Border reads clamp.
pub fn fit_affine(
    guide: &ImageRgbF32,
    accumulation: &ImageF32,
    kernel: &[f32; 9],
    cx: isize,
    cy: isize,
) -> AffineFit {
    let (mut mx, mut my, mut mxx, mut mxy) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
    for dy in -1isize..=1 {
        for dx in -1isize..=1 {
            let w = kernel[((dy + 1) * 3 + dx + 1) as usize];
            let g = guide.sample_clamped(cx + dx, cy + dy)[MID];
            let a = accumulation.sample_clamped(cx + dx, cy + dy);
            mx += w * g;
            my += w * a;
            mxx += w * g * g;
            mxy += w * g * a;
        }
    }
    let variance = (mxx - mx * mx).max(VARIANCE_EPS);
    let slope = (mxy - mx * my) / variance;
    AffineFit {
        slope,
        intercept: my - slope * mx,
    }
}

/// Exposure multiplier turning `luminance` into the fitted target, eased
/// towards 1 for near-black pixels.
#[inline]
pub fn exposure_multiplier(luminance: f32, fit: AffineFit) -> f32 {
    let target = fit.eval(luminance).max(0.0);
    let ratio = target / luminance.max(LUMINANCE_EPS);
    let t = (luminance / DARK_THRESHOLD).clamp(0.0, 1.0);
    let fade = t * t;
    1.0 + (ratio - 1.0) * fade
}

/// Produce the display-referred output for `source`.
///
/// `guide` and `accumulation` are the exposure and accumulation levels at
/// the display mip and must share dimensions; `out` must match `source`.
pub fn guided_upsample(
    source: &ImageRgbF32,
    guide: &ImageRgbF32,
    accumulation: &ImageF32,
    exposure: f32,
    out: &mut ImageRgbF32,
) {
    assert_eq!(
        guide.dimensions(),
        accumulation.dimensions(),
        "guide and accumulation must come from the same level"
    );
    assert_eq!(
        source.dimensions(),
        out.dimensions(),
        "output must match the source resolution"
    );
    let (w, h) = source.dimensions();
    let scaling = LevelScaling::from_dimensions(guide.w, guide.h, w, h);
    let kernel = guide_kernel();
    out.fill_rows(|y, dst| {
        let src = source.row(y);
        for (x, (d, &px)) in dst.iter_mut().zip(src).enumerate() {
            let [cx, cy] = scaling.nearest_level_pixel(x, y);
            let fit = fit_affine(guide, accumulation, &kernel, cx, cy);
            let lum = perceptual_luminance(px, exposure);
            let multiplier = exposure_multiplier(lum, fit);
            *d = display_color(px, exposure * multiplier);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_is_normalized_and_peaked() {
        let k = guide_kernel();
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(k[4] > k[1] && k[1] > k[0]);
    }

    #[test]
    fn fit_recovers_exact_affine_relation() {
        let mut guide = ImageRgbF32::new(3, 3);
        let mut acc = ImageF32::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                let g = 0.1 + 0.1 * x as f32 + 0.25 * y as f32;
                guide.set(x, y, [0.0, g, 0.0]);
                acc.set(x, y, 0.8 * g + 0.05);
            }
        }
        let fit = fit_affine(&guide, &acc, &guide_kernel(), 1, 1);
        assert!((fit.slope - 0.8).abs() < 1e-3, "{fit:?}");
        assert!((fit.intercept - 0.05).abs() < 1e-3, "{fit:?}");
    }

    #[test]
    fn flat_guide_falls_back_to_mean() {
        let guide = ImageRgbF32::filled(3, 3, [0.0, 0.4, 0.0]);
        let acc = ImageF32::filled(3, 3, 0.55);
        let fit = fit_affine(&guide, &acc, &guide_kernel(), 1, 1);
        assert!(fit.slope.abs() < 1e-3, "{fit:?}");
        assert!((fit.eval(0.4) - 0.55).abs() < 1e-4, "{fit:?}");
    }

    #[test]
    fn multiplier_fades_to_one_in_the_dark() {
        let fit = AffineFit {
            slope: 0.0,
            intercept: 0.5,
        };
        assert!((exposure_multiplier(0.0, fit) - 1.0).abs() < 1e-6);

        let lum = DARK_THRESHOLD * 0.5;
        let ratio = 0.5 / lum;
        let half = exposure_multiplier(lum, fit);
        let eased = 1.0 + (ratio - 1.0) * 0.25;
        assert!((half - eased).abs() < eased * 1e-3, "half={half} eased={eased}");

        let full = exposure_multiplier(DARK_THRESHOLD * 2.0, fit);
        assert!((full - 0.5 / (DARK_THRESHOLD * 2.0)).abs() < 1e-2, "full={full}");
    }

    #[test]
    fn negative_targets_clamp_to_zero() {
        let fit = AffineFit {
            slope: -2.0,
            intercept: 0.0,
        };
        assert_eq!(exposure_multiplier(0.5, fit), 0.0);
    }

    #[test]
    fn identity_fit_reproduces_plain_tonemap() {
        let source = ImageRgbF32::filled(4, 4, [0.3, 0.2, 0.1]);
        let lum = perceptual_luminance([0.3, 0.2, 0.1], 1.0);
        let guide = ImageRgbF32::filled(2, 2, [0.0, lum, 0.0]);
        let acc = ImageF32::filled(2, 2, lum);
        let mut out = ImageRgbF32::new(4, 4);
        guided_upsample(&source, &guide, &acc, 1.0, &mut out);
        let expected = display_color([0.3, 0.2, 0.1], 1.0);
        for px in &out.data {
            for (a, b) in px.iter().zip(expected) {
                assert!((a - b).abs() < 1e-4, "px={px:?} expected={expected:?}");
            }
        }
    }
}
