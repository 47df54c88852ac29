//! Laplacian-pyramid fusion of the synthetic exposures.
//!
//! Overview
//! - Base: at the coarsest level in use (`mip_level`) every pixel's exposure
//!   luminances are averaged with that level's normalized weights. The result
//!   seeds the scalar accumulation pyramid.
//! - Refinement: walking from `mip_level` towards `display_mip`, the coarser
//!   exposure level and the coarser accumulation are bilinearly upsampled
//!   onto the finer grid. The per-exposure Laplacian is the finer level minus
//!   the upsampled coarser level; a weighted sum of the three Laplacians is
//!   added to the upsampled accumulation.
//! - Contrast boost: optionally re-biases each pixel's weights towards the
//!   exposure whose Laplacian has the larger magnitude.
//!
//! The accumulation at `display_mip` is therefore the upsampled base blend
//! plus every intervening weighted Laplacian, the usual Laplacian pyramid
//! reconstruction.
use crate::diagnostics::BlendLevelReport;
use crate::image::{ImageF32, ImageRgbF32, ImageView, ImageViewMut, Rgb};
use crate::pyramid::{upsample_bilinear, Pyramid};
use crate::weights::normalize;
use log::trace;

/// Additive guard on Laplacian magnitudes when boosting contrast.
pub const LAPLACIAN_EPS: f32 = 1e-5;

/// Level range and weighting mode of one blend pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlendSettings {
    /// Coarsest level used; seeds the accumulation.
    pub mip_level: usize,
    /// Finest level produced; `<= mip_level`.
    pub display_mip: usize,
    /// Weight Laplacians by their magnitude.
    pub boost_local_contrast: bool,
}

#[inline]
fn dot(a: Rgb, b: Rgb) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Weights applied to one pixel's three Laplacians.
///
/// Without boost these are the exposure weights unchanged. With boost each
/// weight is scaled by `|laplacian| + ε` and the triple renormalized.
#[inline]
pub fn laplacian_weights(weights: Rgb, laplacian: Rgb, boost: bool) -> Rgb {
    if !boost {
        return weights;
    }
    normalize([
        weights[0] * (laplacian[0].abs() + LAPLACIAN_EPS),
        weights[1] * (laplacian[1].abs() + LAPLACIAN_EPS),
        weights[2] * (laplacian[2].abs() + LAPLACIAN_EPS),
    ])
}

/// Weighted Laplacian of one pixel.
#[inline]
pub fn weighted_laplacian(fine: Rgb, coarse: Rgb, weights: Rgb, boost: bool) -> f32 {
    let lap = [fine[0] - coarse[0], fine[1] - coarse[1], fine[2] - coarse[2]];
    dot(laplacian_weights(weights, lap, boost), lap)
}

/// Write the weighted average of `exposures` into `out`.
pub fn base_blend(exposures: &ImageRgbF32, weights: &ImageRgbF32, out: &mut ImageF32) {
    assert_eq!(
        exposures.dimensions(),
        weights.dimensions(),
        "exposure and weight levels must match"
    );
    assert_eq!(
        exposures.dimensions(),
        out.dimensions(),
        "accumulation level must match its exposure level"
    );
    out.fill_rows(|y, dst| {
        let lums = exposures.row(y);
        let ws = weights.row(y);
        for ((d, &l), &w) in dst.iter_mut().zip(lums).zip(ws) {
            *d = dot(l, w);
        }
    });
}

/// Add the weighted Laplacian between `fine` and `coarse_up` to `accumulation`.
///
/// `coarse_up` is the next coarser exposure level already resampled onto the
/// grid of `fine`, and `accumulation` holds the upsampled coarser
/// accumulation. All four grids must share one resolution.
pub fn add_weighted_laplacian(
    fine: &ImageRgbF32,
    coarse_up: &ImageRgbF32,
    weights: &ImageRgbF32,
    boost: bool,
    accumulation: &mut ImageF32,
) {
    let dims = fine.dimensions();
    assert_eq!(coarse_up.dimensions(), dims, "upsampled coarse level size mismatch");
    assert_eq!(weights.dimensions(), dims, "weight level size mismatch");
    assert_eq!(accumulation.dimensions(), dims, "accumulation level size mismatch");
    accumulation.fill_rows(|y, acc| {
        let f = fine.row(y);
        let c = coarse_up.row(y);
        let w = weights.row(y);
        for x in 0..acc.len() {
            acc[x] += weighted_laplacian(f[x], c[x], w[x], boost);
        }
    });
}

/// Run the base blend and every refinement step.
///
/// `accumulation` and `coarse_up` must be allocated with the same level
/// layout as `exposures`; `coarse_up` is scratch. Returns one report per
/// produced accumulation level, coarsest first.
pub fn blend_pyramid(
    exposures: &Pyramid,
    weights: &Pyramid,
    settings: BlendSettings,
    accumulation: &mut Pyramid<ImageF32>,
    coarse_up: &mut Pyramid,
) -> Vec<BlendLevelReport> {
    let BlendSettings {
        mip_level,
        display_mip,
        boost_local_contrast,
    } = settings;
    assert!(
        mip_level < exposures.len(),
        "mip level {mip_level} outside pyramid of {} levels",
        exposures.len()
    );
    assert!(display_mip <= mip_level, "display mip above mip level");
    assert_eq!(exposures.len(), weights.len(), "weight pyramid depth mismatch");
    assert_eq!(exposures.len(), accumulation.len(), "accumulation depth mismatch");
    assert_eq!(exposures.len(), coarse_up.len(), "scratch depth mismatch");

    let mut reports = Vec::with_capacity(mip_level - display_mip + 1);

    base_blend(
        &exposures.levels[mip_level],
        &weights.levels[mip_level],
        &mut accumulation.levels[mip_level],
    );
    reports.push(BlendLevelReport::new(
        mip_level,
        &accumulation.levels[mip_level],
        false,
    ));

    for level in (display_mip..mip_level).rev() {
        {
            let (finer, coarser) = accumulation.levels.split_at_mut(level + 1);
            upsample_bilinear(&coarser[0], &mut finer[level]);
        }
        let scratch = &mut coarse_up.levels[level];
        upsample_bilinear(&exposures.levels[level + 1], scratch);
        add_weighted_laplacian(
            &exposures.levels[level],
            scratch,
            &weights.levels[level],
            boost_local_contrast,
            &mut accumulation.levels[level],
        );
        let acc = &accumulation.levels[level];
        trace!(
            "blend level {} {}x{} mean={:.4}",
            level,
            acc.w,
            acc.h,
            acc.mean()
        );
        reports.push(BlendLevelReport::new(level, acc, true));
    }

    reports
}
