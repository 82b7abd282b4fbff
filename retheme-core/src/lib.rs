pub mod color;
pub mod error;
pub mod palette;
pub mod pipeline;
pub mod pixels;
pub mod recolor;

pub use color::ChannelCount;
pub use error::{RethemeError, Result};
pub use palette::Palette;
pub use pixels::PixelBuffer;
pub use recolor::recolor;
