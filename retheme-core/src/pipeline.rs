/// Full processing pipeline:
/// load image -> expand to RGB/RGBA buffer -> match palette width -> recolor -> save PNG
use std::io::{self, Cursor};
use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, RgbImage, RgbaImage};
use log::debug;

use crate::color::ChannelCount;
use crate::error::{RethemeError, Result};
use crate::palette::Palette;
use crate::pixels::PixelBuffer;
use crate::recolor::recolor;

/// Expand a decoded image to 8-bit RGB, or RGBA when its color type carries alpha.
///
/// Luma, indexed and 16-bit sources are all widened by the codec first.
pub fn buffer_from_image(img: &DynamicImage) -> Result<PixelBuffer> {
    let (width, height) = img.dimensions();

    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        PixelBuffer::from_raw(
            width as usize,
            height as usize,
            ChannelCount::Rgba,
            rgba.into_raw(),
        )
    } else {
        let rgb = img.to_rgb8();
        PixelBuffer::from_raw(
            width as usize,
            height as usize,
            ChannelCount::Rgb,
            rgb.into_raw(),
        )
    }
}

/// Wrap a pixel buffer back into an image for encoding.
pub fn image_from_buffer(buffer: PixelBuffer) -> Result<DynamicImage> {
    let width = buffer.width();
    let height = buffer.height();
    let channels = buffer.channel_count();
    let raw = buffer.into_raw();
    let len = raw.len();

    let img = match channels {
        ChannelCount::Rgb => {
            RgbImage::from_raw(width as u32, height as u32, raw).map(DynamicImage::ImageRgb8)
        }
        ChannelCount::Rgba => {
            RgbaImage::from_raw(width as u32, height as u32, raw).map(DynamicImage::ImageRgba8)
        }
    };

    img.ok_or(RethemeError::BufferShape {
        len,
        width,
        height,
        channels: channels.get(),
    })
}

/// Match the palette to the image: an RGBA palette loses its alpha channel for
/// images without one.
pub fn palette_for(pixels: &PixelBuffer, palette: &Palette) -> Result<Palette> {
    palette.channels(pixels.channel_count())
}

/// Recolor a decoded image against `palette`, keeping its alpha-ness.
pub fn retheme_image(img: &DynamicImage, palette: &Palette) -> Result<DynamicImage> {
    let buffer = buffer_from_image(img)?;
    let palette = palette_for(&buffer, palette)?;
    let recolored = recolor(&buffer, &palette)?;
    image_from_buffer(recolored)
}

/// Open and decode an image. A missing file is reported as [`RethemeError::NotFound`].
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    match image::open(path) {
        Ok(img) => {
            debug!(
                "loaded {} ({}x{}, {:?})",
                path.display(),
                img.width(),
                img.height(),
                img.color()
            );
            Ok(img)
        }
        Err(ImageError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
            Err(RethemeError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Process and save a single image file. The output format follows the
/// output path's extension.
pub fn process_file(input_path: &Path, output_path: &Path, palette: &Palette) -> Result<()> {
    let img = load_image(input_path)?;
    let result = retheme_image(&img, palette)?;
    result.save(output_path)?;
    debug!("saved {}", output_path.display());
    Ok(())
}

/// Decode image bytes (PNG, JPEG, WebP, ...), recolor, and encode as PNG.
pub fn retheme_bytes(image_bytes: &[u8], palette: &Palette) -> Result<Vec<u8>> {
    let img = image::load_from_memory(image_bytes)?;
    let result = retheme_image(&img, palette)?;

    let mut output = Vec::new();
    result.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
