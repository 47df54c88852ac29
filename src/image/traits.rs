//! Row-oriented read/write access shared by every sample grid in the crate.
//!
//! Stages only ever need row slices and an edge-clamped point read, which is
//! the CPU counterpart of a clamp-to-edge sampled texture.

pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn is_contiguous(&self) -> bool {
        self.stride() == self.width()
    }

    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Read the pixel at `(x, y)`, replicating the border for out-of-range
    /// coordinates. Panics on an empty image.
    #[inline]
    fn sample_clamped(&self, x: isize, y: isize) -> Self::Pixel {
        let cx = clamp_index(x, self.width());
        let cy = clamp_index(y, self.height());
        self.row(cy)[cx]
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    fn as_mut_slice(&mut self) -> Option<&mut [Self::Pixel]> {
        None
    }

    /// Overwrite every row with `kernel(y, row)`, row-parallel when enabled.
    fn fill_rows<F>(&mut self, kernel: F)
    where
        Self: Sized,
        Self::Pixel: Send,
        F: Fn(usize, &mut [Self::Pixel]) + Send + Sync,
    {
        let (w, h) = self.dimensions();
        if let Some(data) = self.as_mut_slice() {
            for_each_row_mut(data, w, kernel);
            return;
        }
        for y in 0..h {
            kernel(y, self.row_mut(y));
        }
    }
}

/// Owned grid that can be allocated at a given size.
pub trait Grid: ImageViewMut + Sized {
    /// Zero-initialized grid of `w × h` pixels.
    fn with_size(w: usize, h: usize) -> Self;
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}

#[inline]
pub(crate) fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 || idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

/// Run `kernel(y, row)` over every row of a contiguous row-major buffer.
///
/// Rows are dispatched to the rayon pool when the `parallel` feature is
/// enabled. Kernels must only write to the row they are handed.
pub fn for_each_row_mut<P, F>(data: &mut [P], width: usize, kernel: F)
where
    P: Send,
    F: Fn(usize, &mut [P]) + Send + Sync,
{
    if width == 0 || data.is_empty() {
        return;
    }
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| kernel(y, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        for (y, row) in data.chunks_mut(width).enumerate() {
            kernel(y, row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_index_replicates_border() {
        assert_eq!(clamp_index(-3, 5), 0);
        assert_eq!(clamp_index(2, 5), 2);
        assert_eq!(clamp_index(7, 5), 4);
        assert_eq!(clamp_index(1, 0), 0);
    }

    #[test]
    fn for_each_row_mut_visits_rows_in_order() {
        let mut data = vec![0usize; 12];
        for_each_row_mut(&mut data, 4, |y, row| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = y * 10 + x;
            }
        });
        assert_eq!(data[0], 0);
        assert_eq!(data[5], 11);
        assert_eq!(data[11], 23);
    }
}
