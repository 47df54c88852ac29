pub mod f32;
pub mod io;
pub mod rgb;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::rgb::{ImageRgbF32, Rgb};
pub use self::traits::{for_each_row_mut, Grid, ImageView, ImageViewMut, Rows};
