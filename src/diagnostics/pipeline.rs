use crate::diagnostics::{BlendStage, PyramidStage, TimingBreakdown};
use crate::fusion::FusionParams;
use crate::image::ImageRgbF32;
use serde::Serialize;

/// Result produced by [`LocalToneMapper::process_with_diagnostics`](crate::LocalToneMapper).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionReport {
    #[serde(skip)]
    pub output: ImageRgbF32,
    pub trace: FusionTrace,
}

/// End-to-end trace describing the internal execution of the tone mapper.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionTrace {
    pub input: InputDescriptor,
    /// Parameters after clamping to the pyramid depth.
    pub params: FusionParams,
    pub timings: TimingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pyramid: Option<PyramidStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blend: Option<BlendStage>,
    /// Number of times the workspace had to allocate new level buffers.
    pub workspace_allocations: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub pyramid_levels: usize,
}
