use crate::image::ImageF32;
use serde::{Deserialize, Serialize};

/// One accumulation level produced by the blender.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendLevelReport {
    pub level_index: usize,
    pub width: usize,
    pub height: usize,
    pub mean_accumulation: f32,
    /// `false` for the base blend, `true` for Laplacian refinement steps.
    pub refined: bool,
}

impl BlendLevelReport {
    pub fn new(level_index: usize, accumulation: &ImageF32, refined: bool) -> Self {
        Self {
            level_index,
            width: accumulation.w,
            height: accumulation.h,
            mean_accumulation: accumulation.mean(),
            refined,
        }
    }
}

/// Blend walk from the seed level down to the display level.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendStage {
    pub mip_level: usize,
    pub display_mip: usize,
    pub boost_local_contrast: bool,
    /// Coarsest first.
    pub levels: Vec<BlendLevelReport>,
}
