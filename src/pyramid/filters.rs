//! Resampling kernels used between pyramid levels.
//!
//! - [`downsample_box`]: 2×2 box average with border clamping, the
//!   reduction step of the pyramid. Odd extents replicate the last row or
//!   column.
//! - [`upsample_bilinear`]: pixel-center aligned bilinear interpolation into an
//!   arbitrary destination size, used to bring a coarser level onto the grid
//!   of the next finer one.
use crate::image::{ImageView, ImageViewMut, Rgb};

/// Pixel types that can be linearly combined by the resampling kernels.
pub trait Sample: Copy + Send + Sync {
    fn zero() -> Self;
    /// `self + other · weight`
    fn add_scaled(self, other: Self, weight: f32) -> Self;
}

impl Sample for f32 {
    #[inline]
    fn zero() -> Self {
        0.0
    }
    #[inline]
    fn add_scaled(self, other: Self, weight: f32) -> Self {
        self + other * weight
    }
}

impl Sample for Rgb {
    #[inline]
    fn zero() -> Self {
        [0.0; 3]
    }
    #[inline]
    fn add_scaled(self, other: Self, weight: f32) -> Self {
        [
            self[0] + other[0] * weight,
            self[1] + other[1] * weight,
            self[2] + other[2] * weight,
        ]
    }
}

/// Halve `src` into `dst` by averaging each 2×2 block.
///
/// `dst` must be `⌈w/2⌉ × ⌈h/2⌉`.
pub fn downsample_box<P, S, D>(src: &S, dst: &mut D)
where
    P: Sample,
    S: ImageView<Pixel = P> + Sync,
    D: ImageViewMut<Pixel = P>,
{
    let (sw, sh) = src.dimensions();
    assert_eq!(
        dst.dimensions(),
        (sw.div_ceil(2), sh.div_ceil(2)),
        "box downsample expects a half-resolution destination"
    );
    if sw == 0 || sh == 0 {
        return;
    }
    dst.fill_rows(|y, out| {
        let r0 = src.row((2 * y).min(sh - 1));
        let r1 = src.row((2 * y + 1).min(sh - 1));
        for (x, px) in out.iter_mut().enumerate() {
            let x0 = (2 * x).min(sw - 1);
            let x1 = (2 * x + 1).min(sw - 1);
            *px = P::zero()
                .add_scaled(r0[x0], 0.25)
                .add_scaled(r0[x1], 0.25)
                .add_scaled(r1[x0], 0.25)
                .add_scaled(r1[x1], 0.25);
        }
    });
}

/// Resample `src` onto the grid of `dst` with bilinear interpolation.
///
/// Pixel centers are aligned, so a 2× upsample places each source sample
/// between four destination samples. Reads outside `src` clamp to the edge.
pub fn upsample_bilinear<P, S, D>(src: &S, dst: &mut D)
where
    P: Sample,
    S: ImageView<Pixel = P> + Sync,
    D: ImageViewMut<Pixel = P>,
{
    let (sw, sh) = src.dimensions();
    let (dw, dh) = dst.dimensions();
    if sw == 0 || sh == 0 || dw == 0 || dh == 0 {
        return;
    }
    let scale_x = sw as f32 / dw as f32;
    let scale_y = sh as f32 / dh as f32;
    dst.fill_rows(|y, out| {
        let fy = (y as f32 + 0.5) * scale_y - 0.5;
        let y0 = fy.floor();
        let ty = fy - y0;
        let y0 = y0 as isize;
        for (x, px) in out.iter_mut().enumerate() {
            let fx = (x as f32 + 0.5) * scale_x - 0.5;
            let x0 = fx.floor();
            let tx = fx - x0;
            let x0 = x0 as isize;
            *px = P::zero()
                .add_scaled(src.sample_clamped(x0, y0), (1.0 - tx) * (1.0 - ty))
                .add_scaled(src.sample_clamped(x0 + 1, y0), tx * (1.0 - ty))
                .add_scaled(src.sample_clamped(x0, y0 + 1), (1.0 - tx) * ty)
                .add_scaled(src.sample_clamped(x0 + 1, y0 + 1), tx * ty);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageF32, ImageRgbF32};

    #[test]
    fn box_downsample_averages_blocks() {
        let mut src = ImageF32::new(4, 2);
        src.data = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let mut dst = ImageF32::new(2, 1);
        downsample_box(&src, &mut dst);
        assert_eq!(dst.data, vec![2.5, 4.5]);
    }

    #[test]
    fn box_downsample_clamps_odd_extent() {
        let mut src = ImageF32::new(3, 1);
        src.data = vec![1.0, 2.0, 8.0];
        let mut dst = ImageF32::new(2, 1);
        downsample_box(&src, &mut dst);
        assert_eq!(dst.data, vec![1.5, 8.0]);
    }

    #[test]
    fn bilinear_preserves_constants() {
        let src = ImageRgbF32::filled(3, 2, [0.25, 0.5, 0.75]);
        let mut dst = ImageRgbF32::new(6, 4);
        upsample_bilinear(&src, &mut dst);
        for px in &dst.data {
            for (a, b) in px.iter().zip([0.25, 0.5, 0.75]) {
                assert!((a - b).abs() < 1e-6, "px={px:?}");
            }
        }
    }

    #[test]
    fn bilinear_interpolates_between_centers() {
        let mut src = ImageF32::new(2, 1);
        src.data = vec![0.0, 1.0];
        let mut dst = ImageF32::new(4, 1);
        upsample_bilinear(&src, &mut dst);
        let expected = [0.0, 0.25, 0.75, 1.0];
        for (a, b) in dst.data.iter().zip(expected) {
            assert!((a - b).abs() < 1e-6, "got {:?}", dst.data);
        }
    }
}
