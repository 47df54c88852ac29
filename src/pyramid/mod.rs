//! Box-filtered image pyramid with 2× decimation.
//!
//! Purpose
//! - Provide the chain of decreasing-resolution copies of the packed exposure
//!   luminances and of their weights that the Laplacian blender walks.
//!
//! Design
//! - Level 0 is full resolution and is written by the caller.
//! - Level `k+1` is `⌈w_k/2⌉ × ⌈h_k/2⌉`, each pixel the mean of a 2×2 block of
//!   level `k` (border rows/columns replicate for odd extents).
//! - Levels are generated while both dimensions exceed 1, so the coarsest
//!   level has at least one extent equal to 1.
//! - Storage is allocated once per source resolution by [`Pyramid::allocate`];
//!   [`Pyramid::rebuild`] only rewrites the existing buffers.
//!
//! Notes
//! - Averaging normalized weight triples keeps them normalized, so weight
//!   levels need no renormalization after reduction.
//!
//! Complexity
//! - O(W·H) per level, O(4/3·W·H) memory per pyramid.

pub mod filters;
pub mod scaling;

pub use filters::{downsample_box, upsample_bilinear, Sample};
pub use scaling::LevelScaling;

use crate::image::{Grid, ImageRgbF32, ImageView};
use log::trace;

/// Dimensions of every level for a `width × height` base.
pub fn level_dimensions(width: usize, height: usize) -> Vec<(usize, usize)> {
    let mut dims = vec![(width, height)];
    let (mut w, mut h) = (width, height);
    while w > 1 && h > 1 {
        w = w.div_ceil(2);
        h = h.div_ceil(2);
        dims.push((w, h));
    }
    dims
}

#[derive(Clone, Debug, Default)]
pub struct Pyramid<I = ImageRgbF32> {
    pub levels: Vec<I>,
}

impl<I> Pyramid<I>
where
    I: Grid + Sync,
    I::Pixel: Sample,
{
    /// Allocate zeroed levels for a `width × height` base.
    pub fn allocate(width: usize, height: usize) -> Self {
        let levels = level_dimensions(width, height)
            .into_iter()
            .map(|(w, h)| I::with_size(w, h))
            .collect();
        Self { levels }
    }

    /// Recompute levels `1..` from level 0.
    pub fn rebuild(&mut self) {
        for k in 1..self.levels.len() {
            let (finer, coarser) = self.levels.split_at_mut(k);
            let src = &finer[k - 1];
            let dst = &mut coarser[0];
            downsample_box(src, dst);
            trace!(
                "pyramid level {} built {}x{} -> {}x{}",
                k,
                src.width(),
                src.height(),
                dst.width(),
                dst.height()
            );
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Dimensions of level 0, `(0, 0)` when empty.
    pub fn base_dimensions(&self) -> (usize, usize) {
        self.levels.first().map_or((0, 0), |l| l.dimensions())
    }

    pub fn level(&self, index: usize) -> Option<&I> {
        self.levels.get(index)
    }

    pub fn coarsest(&self) -> Option<&I> {
        self.levels.last()
    }
}
