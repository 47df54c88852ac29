//! Synthetic exposure bracket derived from a single HDR frame.
//!
//! Every source pixel is tonemapped three times at different gains and each
//! result is reduced to a perceptual luminance. The three values are packed
//! into one RGB triple so the rest of the pipeline can treat the bracket as a
//! single three-channel image:
//!
//! | channel | exposure            | gain                              |
//! |---------|---------------------|-----------------------------------|
//! | 0       | highlight-biased    | `exposure · 2^(-highlights_stop)` |
//! | 1       | neutral             | `exposure`                        |
//! | 2       | shadow-biased       | `exposure · 2^(shadows_stop)`     |
//!
//! With local tone mapping disabled all three gains collapse to `exposure`.
use crate::image::{ImageRgbF32, ImageView, ImageViewMut};
use crate::tonemap::perceptual_luminance;

/// Channel index of the highlight-biased exposure.
pub const HIGHLIGHT: usize = 0;
/// Channel index of the neutral exposure.
pub const MID: usize = 1;
/// Channel index of the shadow-biased exposure.
pub const SHADOW: usize = 2;

/// Linear gains applied to the source before tonemapping, in channel order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExposureGains(pub [f32; 3]);

impl ExposureGains {
    pub fn new(
        exposure: f32,
        shadows_stop: f32,
        highlights_stop: f32,
        enable_local_tone_mapping: bool,
    ) -> Self {
        if !enable_local_tone_mapping {
            return Self([exposure; 3]);
        }
        let mut gains = [exposure; 3];
        gains[HIGHLIGHT] *= (-highlights_stop).exp2();
        gains[SHADOW] *= shadows_stop.exp2();
        Self(gains)
    }

    #[inline]
    pub fn neutral(&self) -> f32 {
        self.0[MID]
    }
}

/// Fill `out` with the packed exposure luminances of `source`.
///
/// `out` must have the same dimensions as `source`.
pub fn synthesize_exposures(source: &ImageRgbF32, gains: ExposureGains, out: &mut ImageRgbF32) {
    assert_eq!(
        source.dimensions(),
        out.dimensions(),
        "exposure buffer must match the source resolution"
    );
    let gains = gains.0;
    out.fill_rows(|y, dst| {
        let src = source.row(y);
        for (d, &px) in dst.iter_mut().zip(src) {
            *d = gains.map(|g| perceptual_luminance(px, g));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_local_mapping_collapses_gains() {
        let gains = ExposureGains::new(2.0, 1.5, 2.0, false);
        assert_eq!(gains.0, [2.0; 3]);
    }

    #[test]
    fn gains_follow_stops() {
        let gains = ExposureGains::new(1.0, 1.0, 2.0, true);
        assert!((gains.0[HIGHLIGHT] - 0.25).abs() < 1e-6);
        assert!((gains.0[MID] - 1.0).abs() < 1e-6);
        assert!((gains.0[SHADOW] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn shadow_channel_is_brightest() {
        let src = ImageRgbF32::filled(3, 2, [0.2, 0.3, 0.1]);
        let mut out = ImageRgbF32::new(3, 2);
        synthesize_exposures(&src, ExposureGains::new(1.0, 1.5, 1.5, true), &mut out);
        for px in &out.data {
            assert!(px[HIGHLIGHT] < px[MID] && px[MID] < px[SHADOW], "px={px:?}");
            assert!(px.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn negative_and_nan_samples_stay_finite() {
        let src = ImageRgbF32::filled(2, 2, [-1.0, f32::NAN, -0.5]);
        let mut out = ImageRgbF32::new(2, 2);
        synthesize_exposures(&src, ExposureGains::new(1.0, 1.0, 1.0, true), &mut out);
        for px in &out.data {
            assert_eq!(*px, [0.0; 3]);
        }
    }
}
