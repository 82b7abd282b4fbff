use ndarray::iter::Lanes;
use ndarray::{Array3, ArrayView1, Axis, Ix2};

use crate::color::ChannelCount;
use crate::error::{RethemeError, Result};

/// Decoded image as a `height x width x channels` grid of 8-bit samples, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
    channels: ChannelCount,
}

impl PixelBuffer {
    /// Wrap raw interleaved samples, e.g. the output of `RgbImage::into_raw`.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: ChannelCount,
        raw: Vec<u8>,
    ) -> Result<Self> {
        let len = raw.len();
        let data = Array3::from_shape_vec((height, width, channels.get()), raw).map_err(|_| {
            RethemeError::BufferShape {
                len,
                width,
                height,
                channels: channels.get(),
            }
        })?;
        Ok(Self { data, channels })
    }

    /// Wrap an existing array; the last axis is the channel axis.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let channels = ChannelCount::from_usize(data.len_of(Axis(2)))?;
        Ok(Self { data, channels })
    }

    /// A buffer where every pixel is `color`.
    pub fn filled(width: usize, height: usize, color: &[u8]) -> Result<Self> {
        let channels = ChannelCount::from_usize(color.len())?;
        let raw = color
            .iter()
            .copied()
            .cycle()
            .take(width * height * color.len())
            .collect();
        Self::from_raw(width, height, channels, raw)
    }

    pub fn width(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn height(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn channel_count(&self) -> ChannelCount {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Channel vector of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: usize, y: usize) -> ArrayView1<'_, u8> {
        self.data.slice(ndarray::s![y, x, ..])
    }

    /// One channel vector per pixel, laid out as a `height x width` producer.
    pub fn pixel_lanes(&self) -> Lanes<'_, u8, Ix2> {
        self.data.lanes(Axis(2))
    }

    /// Interleaved samples in row-major order.
    pub fn into_raw(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            let len = self.data.len();
            let (mut raw, offset) = self.data.into_raw_vec_and_offset();
            if let Some(offset) = offset.filter(|&o| o > 0) {
                raw.drain(..offset);
            }
            raw.truncate(len);
            raw
        } else {
            self.data.iter().copied().collect()
        }
    }
}
