//! Local tone mapping of HDR images by synthetic exposure fusion.
//!
//! One linear HDR frame is turned into three virtual exposures, blended
//! through a Laplacian pyramid with per-pixel well-exposedness weights, and
//! reconstructed at full resolution with a guided upsampler.

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fusion;
pub mod image;

// Stage modules, each usable in isolation on synthetic grids.
pub mod blend;
pub mod exposure;
pub mod pyramid;
pub mod tonemap;
pub mod upsample;
pub mod weights;

// --- High-level re-exports -------------------------------------------------

pub use crate::diagnostics::{FusionReport, FusionTrace};
pub use crate::error::{Error, Result};
pub use crate::fusion::{FusionParams, FusionWorkspace, LocalToneMapper};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use local_tonemap::prelude::*;
///
/// # fn main() -> local_tonemap::Result<()> {
/// let (w, h) = (64usize, 48usize);
/// let samples = vec![0.5f32; w * h * 3];
/// let hdr = ImageRgbF32::from_interleaved(w, h, &samples)?;
///
/// let mut mapper = LocalToneMapper::new(FusionParams {
///     boost_local_contrast: true,
///     ..Default::default()
/// });
/// let ldr = mapper.process(&hdr);
/// println!("{}x{}", ldr.w, ldr.h);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageRgbF32, ImageView};
    pub use crate::{FusionParams, FusionReport, LocalToneMapper};
}

// --- Stage-level API (for tools & tests) ------------------------------------

pub mod stages {
    pub use crate::blend::{base_blend, blend_pyramid, laplacian_weights, BlendSettings};
    pub use crate::exposure::{synthesize_exposures, ExposureGains};
    pub use crate::pyramid::{level_dimensions, Pyramid};
    pub use crate::upsample::{fit_affine, guided_upsample, AffineFit};
    pub use crate::weights::compute_weights;
}
