//! Coordinate mapping between a pyramid level and the full-resolution image.
//!
//! Levels are produced by `⌈·/2⌉` reductions, so for odd extents the ratio
//! is not an exact power of two. The mapping therefore works from the actual
//! dimensions and aligns pixel centers.

/// Per-level scaling factors between a pyramid level and the full-resolution image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelScaling {
    pub scale_x_to_full: f32,
    pub scale_y_to_full: f32,
}

impl LevelScaling {
    pub fn from_dimensions(
        level_width: usize,
        level_height: usize,
        full_width: usize,
        full_height: usize,
    ) -> Self {
        let scale_x = if level_width > 0 {
            full_width as f32 / level_width as f32
        } else {
            1.0
        };
        let scale_y = if level_height > 0 {
            full_height as f32 / level_height as f32
        } else {
            1.0
        };
        Self {
            scale_x_to_full: scale_x,
            scale_y_to_full: scale_y,
        }
    }

    /// Continuous level coordinate of full-resolution pixel `(x, y)`.
    #[inline]
    pub fn full_to_level(&self, x: usize, y: usize) -> [f32; 2] {
        [
            (x as f32 + 0.5) / self.scale_x_to_full - 0.5,
            (y as f32 + 0.5) / self.scale_y_to_full - 0.5,
        ]
    }

    /// Nearest level pixel to full-resolution pixel `(x, y)`, unclamped.
    #[inline]
    pub fn nearest_level_pixel(&self, x: usize, y: usize) -> [isize; 2] {
        let [lx, ly] = self.full_to_level(x, y);
        [lx.round() as isize, ly.round() as isize]
    }
}
