use crate::pyramid::Pyramid;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Statistics for a single level of the exposure and weight pyramids.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidLevelReport {
    pub level_index: usize,
    pub width: usize,
    pub height: usize,
    /// Mean (highlight, mid, shadow) exposure luminance.
    pub mean_exposure: Vector3<f32>,
    /// Mean normalized weight per exposure.
    pub mean_weight: Vector3<f32>,
}

/// Pyramid construction details captured by the tone mapper.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidStage {
    pub elapsed_ms: f64,
    pub levels: Vec<PyramidLevelReport>,
}

impl PyramidStage {
    pub fn from_pyramids(exposures: &Pyramid, weights: &Pyramid, elapsed_ms: f64) -> Self {
        let levels = exposures
            .levels
            .iter()
            .zip(&weights.levels)
            .enumerate()
            .map(|(level_index, (exp, wts))| PyramidLevelReport {
                level_index,
                width: exp.w,
                height: exp.h,
                mean_exposure: Vector3::from(exp.mean()),
                mean_weight: Vector3::from(wts.mean()),
            })
            .collect();
        Self { elapsed_ms, levels }
    }
}
