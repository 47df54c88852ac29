//! Per-resolution level buffers reused across runs.
//!
//! Every intermediate grid of the pipeline lives here, indexed by pyramid
//! level. Buffers are reallocated only when the source resolution changes;
//! parameter changes rewrite them in place.
use crate::image::{ImageF32, ImageRgbF32};
use crate::pyramid::Pyramid;
use log::debug;

#[derive(Debug, Default)]
pub struct FusionWorkspace {
    dims: (usize, usize),
    /// Packed (highlight, mid, shadow) exposure luminances per level.
    pub(crate) exposures: Pyramid,
    /// Normalized exposure weights per level.
    pub(crate) weights: Pyramid,
    /// Scalar blend accumulation per level.
    pub(crate) accumulation: Pyramid<ImageF32>,
    /// Scratch: level `k+1` exposures resampled onto level `k`.
    pub(crate) coarse_up: Pyramid<ImageRgbF32>,
    allocations: usize,
}

impl FusionWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure every level is allocated for a `width × height` source.
    ///
    /// Returns `true` when new buffers had to be allocated.
    pub fn ensure(&mut self, width: usize, height: usize) -> bool {
        if self.dims == (width, height) && !self.exposures.is_empty() {
            return false;
        }
        self.exposures = Pyramid::allocate(width, height);
        self.weights = Pyramid::allocate(width, height);
        self.accumulation = Pyramid::allocate(width, height);
        self.coarse_up = Pyramid::allocate(width, height);
        self.dims = (width, height);
        self.allocations += 1;
        debug!(
            "FusionWorkspace allocated {} levels for {}x{}",
            self.exposures.len(),
            width,
            height
        );
        true
    }

    /// Resolution the buffers are currently sized for.
    pub fn dimensions(&self) -> (usize, usize) {
        self.dims
    }

    pub fn levels(&self) -> usize {
        self.exposures.len()
    }

    /// Number of times buffers have been (re)allocated.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn exposures(&self) -> &Pyramid {
        &self.exposures
    }

    pub fn weights(&self) -> &Pyramid {
        &self.weights
    }

    /// Accumulation levels; only `display_mip..=mip_level` of the last run
    /// are meaningful.
    pub fn accumulation(&self) -> &Pyramid<ImageF32> {
        &self.accumulation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reallocates_only_on_resolution_change() {
        let mut ws = FusionWorkspace::new();
        assert!(ws.ensure(16, 8));
        assert!(!ws.ensure(16, 8));
        assert_eq!(ws.allocations(), 1);
        assert!(ws.ensure(8, 16));
        assert_eq!(ws.allocations(), 2);
        assert_eq!(ws.levels(), 4);
        assert_eq!(ws.accumulation().levels.len(), ws.levels());
    }
}
