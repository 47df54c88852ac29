//! Serializable reports describing a tone-mapping run.
//!
//! `FusionReport` is the entry point returned by
//! [`LocalToneMapper::process_with_diagnostics`](crate::LocalToneMapper). It
//! bundles the output image with a `FusionTrace` that records the effective
//! parameters, per-level pyramid statistics, the blend walk and timings.

pub mod blend;
pub mod pipeline;
pub mod pyramid;
pub mod timing;

pub use blend::{BlendLevelReport, BlendStage};
pub use pipeline::{FusionReport, FusionTrace, InputDescriptor};
pub use pyramid::{PyramidLevelReport, PyramidStage};
pub use timing::{StageTiming, TimingBreakdown};
