//! Error type for the IO and configuration surface.
//!
//! The tone-mapping stages themselves are infallible: numeric hazards are
//! clamped or epsilon-guarded in place.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Decoding or encoding an image file failed.
    #[error("image error on {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// A JSON document could not be parsed or produced.
    #[error("config error on {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Width or height is zero or overflows.
    #[error("invalid dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),

    /// Pixel buffer does not match the declared dimensions.
    #[error("invalid pixel data: {0}")]
    InvalidPixelData(String),
}

pub type Result<T> = core::result::Result<T, Error>;
