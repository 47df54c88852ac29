//! Parameters controlling the tone-mapping pipeline.
//!
//! All fields are plain values passed explicitly into the
//! [`LocalToneMapper`](crate::LocalToneMapper). Out-of-range values are
//! clamped by [`FusionParams::sanitized`] before a run, never rejected.

use crate::blend::BlendSettings;
use crate::exposure::ExposureGains;
use log::debug;
use serde::{Deserialize, Serialize};

/// Smallest accepted `exposure` and `weight_sigma`.
pub const MIN_POSITIVE: f32 = 1e-4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionParams {
    /// Spread the synthetic exposures by `shadows_stop`/`highlights_stop`.
    /// When `false` all three exposures are identical and the result is a
    /// plain global tonemap.
    pub enable_local_tone_mapping: bool,
    /// Bias Laplacian weights towards the exposure with stronger local detail.
    pub boost_local_contrast: bool,
    /// Global linear gain applied before tonemapping (> 0).
    pub exposure: f32,
    /// Coarsest pyramid level used to seed the blend. Clamped to the pyramid
    /// depth of the input.
    pub mip_level: usize,
    /// Level at which guided upsampling starts, in `[0, mip_level]`.
    pub display_mip: usize,
    /// Extra exposure of the shadow-biased exposure, in stops.
    pub shadows_stop: f32,
    /// Exposure reduction of the highlight-biased exposure, in stops.
    pub highlights_stop: f32,
    /// Sharpness of the per-pixel exposure preference (> 0).
    pub weight_sigma: f32,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            enable_local_tone_mapping: true,
            boost_local_contrast: false,
            exposure: 1.0,
            mip_level: 6,
            display_mip: 2,
            shadows_stop: 1.5,
            highlights_stop: 2.0,
            weight_sigma: 5.0,
        }
    }
}

impl FusionParams {
    /// Return a copy clamped to valid ranges for a pyramid of `levels` levels.
    pub fn sanitized(&self, levels: usize) -> Self {
        let mut p = self.clone();
        let max_level = levels.saturating_sub(1);
        if p.mip_level > max_level {
            debug!("mip_level {} clamped to {}", p.mip_level, max_level);
            p.mip_level = max_level;
        }
        if p.display_mip > p.mip_level {
            debug!("display_mip {} clamped to {}", p.display_mip, p.mip_level);
            p.display_mip = p.mip_level;
        }
        p.exposure = positive_or_clamped("exposure", p.exposure);
        p.weight_sigma = positive_or_clamped("weight_sigma", p.weight_sigma);
        p.shadows_stop = finite_or_zero("shadows_stop", p.shadows_stop);
        p.highlights_stop = finite_or_zero("highlights_stop", p.highlights_stop);
        p
    }

    pub fn exposure_gains(&self) -> ExposureGains {
        ExposureGains::new(
            self.exposure,
            self.shadows_stop,
            self.highlights_stop,
            self.enable_local_tone_mapping,
        )
    }

    pub fn blend_settings(&self) -> BlendSettings {
        BlendSettings {
            mip_level: self.mip_level,
            display_mip: self.display_mip,
            boost_local_contrast: self.boost_local_contrast,
        }
    }
}

fn positive_or_clamped(name: &str, v: f32) -> f32 {
    if v.is_finite() && v >= MIN_POSITIVE {
        return v;
    }
    let clamped = if v.is_nan() {
        1.0
    } else {
        v.clamp(MIN_POSITIVE, f32::MAX)
    };
    debug!("{name} {v} clamped to {clamped}");
    clamped
}

fn finite_or_zero(name: &str, v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        debug!("{name} {v} replaced by 0");
        0.0
    }
}
