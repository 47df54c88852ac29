//! Local tone mapper orchestrating the exposure-fusion pipeline.
//!
//! Overview
//! - Synthesizes three virtual exposures from one HDR frame and packs their
//!   perceptual luminances into one RGB grid.
//! - Scores every exposure per pixel by its distance from mid-gray.
//! - Builds box-filtered pyramids of both grids.
//! - Blends from the coarsest used level (`mip_level`) towards `display_mip`
//!   by adding weighted Laplacians to the upsampled accumulation.
//! - Guided-upsamples the blended luminance to full resolution and applies it
//!   as a per-pixel exposure multiplier.
//!
//! Modules
//! - [`params`] – the parameter struct and its clamping rules.
//! - `pipeline` – the [`LocalToneMapper`] implementation.
//! - `workspace` – level buffers that persist across runs.

pub mod params;
mod pipeline;
mod workspace;

pub use params::FusionParams;
pub use pipeline::LocalToneMapper;
pub use workspace::FusionWorkspace;
