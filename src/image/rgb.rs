//! Owned three-channel f32 grid in row-major layout (stride == width).
//!
//! Used for the linear HDR source, the packed exposure-luminance levels, the
//! normalized weight levels and the final display-referred output. Each
//! pixel is a plain `[f32; 3]` triple; channel meaning depends on the stage.
use super::traits::{Grid, ImageView, ImageViewMut};
use super::ImageF32;
use crate::error::{Error, Result};

pub type Rgb = [f32; 3];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageRgbF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of triples between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<Rgb>,
}

impl ImageRgbF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, [0.0; 3])
    }

    /// Construct a buffer with every pixel set to `value`.
    pub fn filled(w: usize, h: usize, value: Rgb) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap interleaved `RGBRGB…` samples.
    ///
    /// Rejects empty dimensions and buffers whose length is not `3·w·h`.
    pub fn from_interleaved(w: usize, h: usize, samples: &[f32]) -> Result<Self> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidDimensions(w, h));
        }
        let expected = w
            .checked_mul(h)
            .and_then(|n| n.checked_mul(3))
            .ok_or(Error::InvalidDimensions(w, h))?;
        if samples.len() != expected {
            return Err(Error::InvalidPixelData(format!(
                "expected {expected} samples for {w}x{h} RGB, got {}",
                samples.len()
            )));
        }
        let data = samples
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    /// Flatten into interleaved `RGBRGB…` samples.
    pub fn to_interleaved(&self) -> Vec<f32> {
        self.data.iter().flat_map(|px| px.iter().copied()).collect()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: Rgb) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Copy one channel out into a scalar grid.
    pub fn channel(&self, c: usize) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for (dst, src) in out.data.iter_mut().zip(&self.data) {
            *dst = src[c];
        }
        out
    }

    /// Per-channel mean, zero for an empty grid.
    pub fn mean(&self) -> Rgb {
        if self.data.is_empty() {
            return [0.0; 3];
        }
        let mut acc = [0.0f64; 3];
        for px in &self.data {
            for c in 0..3 {
                acc[c] += px[c] as f64;
            }
        }
        let n = self.data.len() as f64;
        [
            (acc[0] / n) as f32,
            (acc[1] / n) as f32,
            (acc[2] / n) as f32,
        ]
    }
}

impl Grid for ImageRgbF32 {
    fn with_size(w: usize, h: usize) -> Self {
        Self::new(w, h)
    }
}

impl ImageView for ImageRgbF32 {
    type Pixel = Rgb;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgb] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[Rgb]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl ImageViewMut for ImageRgbF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgb] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [Rgb]> {
        if self.stride == self.w {
            Some(&mut self.data[..self.w * self.h])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_interleaved_validates_length() {
        let err = ImageRgbF32::from_interleaved(2, 2, &[0.0; 11]).unwrap_err();
        assert!(matches!(err, Error::InvalidPixelData(_)), "got {err:?}");
        let err = ImageRgbF32::from_interleaved(0, 2, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions(0, 2)), "got {err:?}");
    }

    #[test]
    fn interleaved_layout_is_row_major() {
        let samples: Vec<f32> = (0..12).map(|v| v as f32).collect();
        let img = ImageRgbF32::from_interleaved(2, 2, &samples).unwrap();
        assert_eq!(img.get(1, 0), [3.0, 4.0, 5.0]);
        assert_eq!(img.get(0, 1), [6.0, 7.0, 8.0]);
        assert_eq!(img.to_interleaved(), samples);
    }

    #[test]
    fn sample_clamped_replicates_edges() {
        let mut img = ImageRgbF32::new(3, 2);
        img.set(2, 1, [1.0, 2.0, 3.0]);
        assert_eq!(img.sample_clamped(5, 9), [1.0, 2.0, 3.0]);
        assert_eq!(img.sample_clamped(-1, -1), [0.0; 3]);
    }
}
