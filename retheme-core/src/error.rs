use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RethemeError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("image has {pixels} channels but the palette has {palette}")]
    ChannelMismatch { pixels: usize, palette: usize },

    #[error("palette index {index} out of range for {len} colors")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unsupported channel count {0}, expected 3 (RGB) or 4 (RGBA)")]
    UnsupportedChannels(usize),

    #[error("cannot project a {available}-channel palette to {requested} channels")]
    ChannelProjection { requested: usize, available: usize },

    #[error("buffer length {len} does not match {width}x{height} with {channels} channels")]
    BufferShape {
        len: usize,
        width: usize,
        height: usize,
        channels: usize,
    },

    #[error("invalid hex color '{0}': expected RRGGBB or RRGGBBAA")]
    InvalidHex(String),

    #[error("hex colors must all be RRGGBB or all be RRGGBBAA")]
    MixedHexWidths,

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RethemeError>;
