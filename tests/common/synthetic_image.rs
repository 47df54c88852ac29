use local_tonemap::image::ImageRgbF32;

/// Generates a gray checkerboard in linear light with `cell`-pixel tiles.
pub fn checkerboard_hdr(
    width: usize,
    height: usize,
    cell: usize,
    dark: f32,
    bright: f32,
) -> ImageRgbF32 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = ImageRgbF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = if ((x / cell) + (y / cell)) & 1 == 0 {
                dark
            } else {
                bright
            };
            img.set(x, y, [v; 3]);
        }
    }
    img
}

/// Generates a horizontal exponential ramp spanning `stops` stops above
/// `base`, tinted slightly per channel.
pub fn exposure_ramp_hdr(width: usize, height: usize, base: f32, stops: f32) -> ImageRgbF32 {
    let mut img = ImageRgbF32::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let t = x as f32 / (width.max(2) - 1) as f32;
            let v = base * (t * stops).exp2();
            let wobble = 1.0 + 0.05 * ((y as f32) * 0.7).sin();
            img.set(x, y, [v * wobble, v, v * 0.9]);
        }
    }
    img
}
