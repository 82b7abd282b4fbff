/// Nearest-color mapping.
///
/// Every pixel is compared against every palette entry by Euclidean distance
/// over its channels and replaced with the closest entry. Equidistant entries
/// resolve to the lowest palette index. Pixels are independent of each other,
/// so with the `parallel` feature the per-pixel map runs on the rayon pool.
use log::debug;
use ndarray::{aview1, Array2, Array3, Axis, Zip};

use crate::error::{RethemeError, Result};
use crate::palette::Palette;
use crate::pixels::PixelBuffer;

/// Squared Euclidean distance, widened to i32 before subtracting.
#[inline]
fn squared_distance<'a>(pixel: impl Iterator<Item = &'a u8>, color: &[u8]) -> i32 {
    pixel
        .zip(color)
        .map(|(&a, &b)| {
            let d = i32::from(a) - i32::from(b);
            d * d
        })
        .sum()
}

#[inline]
fn nearest_by<'a, I>(pixel: I, palette: &Palette) -> usize
where
    I: Iterator<Item = &'a u8> + Clone,
{
    // sqrt is strictly monotonic, so comparing squared distances picks the
    // same entry. Strict `<` keeps the first of several equal minima.
    let mut best = 0;
    let mut best_dist = i32::MAX;
    for (i, color) in palette.iter().enumerate() {
        let dist = squared_distance(pixel.clone(), color);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn check_width(pixels: usize, palette: usize) -> Result<()> {
    if pixels != palette {
        return Err(RethemeError::ChannelMismatch { pixels, palette });
    }
    Ok(())
}

/// Euclidean distance between two colors of the same width.
pub fn distance(a: &[u8], b: &[u8]) -> Result<f64> {
    check_width(a.len(), b.len())?;
    Ok(f64::from(squared_distance(a.iter(), b)).sqrt())
}

/// Index of the palette entry closest to `pixel`.
pub fn nearest_index(pixel: &[u8], palette: &Palette) -> Result<usize> {
    check_width(pixel.len(), palette.channel_count().get())?;
    Ok(nearest_by(pixel.iter(), palette))
}

/// Palette index of the nearest color for every pixel, shaped `height x width`.
pub fn nearest_indices(pixels: &PixelBuffer, palette: &Palette) -> Result<Array2<usize>> {
    check_width(pixels.channel_count().get(), palette.channel_count().get())?;

    let zip = Zip::from(pixels.pixel_lanes());

    #[cfg(feature = "parallel")]
    let indices = zip.par_map_collect(|pixel| nearest_by(pixel.iter(), palette));
    #[cfg(not(feature = "parallel"))]
    let indices = zip.map_collect(|pixel| nearest_by(pixel.iter(), palette));

    Ok(indices)
}

/// Expand an index map back into palette colors.
pub fn apply_indices(indices: &Array2<usize>, palette: &Palette) -> Result<PixelBuffer> {
    if let Some(&index) = indices.iter().find(|&&i| i >= palette.len()) {
        return Err(RethemeError::IndexOutOfRange {
            index,
            len: palette.len(),
        });
    }

    let (height, width) = indices.dim();
    let mut out = Array3::<u8>::zeros((height, width, palette.channel_count().get()));

    let zip = Zip::from(out.lanes_mut(Axis(2))).and(indices);

    #[cfg(feature = "parallel")]
    zip.par_for_each(|mut dst, &index| dst.assign(&aview1(palette.color(index))));
    #[cfg(not(feature = "parallel"))]
    zip.for_each(|mut dst, &index| dst.assign(&aview1(palette.color(index))));

    PixelBuffer::from_array(out)
}

/// Replace every pixel with its nearest palette color.
///
/// The input is left untouched; the result is a new buffer with the same
/// width, height and channel count.
pub fn recolor(pixels: &PixelBuffer, palette: &Palette) -> Result<PixelBuffer> {
    debug!(
        "recoloring {}x{} {} image against {} colors",
        pixels.width(),
        pixels.height(),
        pixels.channel_count(),
        palette.len()
    );
    let indices = nearest_indices(pixels, palette)?;
    apply_indices(&indices, palette)
}
