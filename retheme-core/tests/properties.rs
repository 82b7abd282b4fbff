use retheme_core::palette::{all_palette_names, default_palette, named_palette};
use retheme_core::recolor::{nearest_index, nearest_indices};
use retheme_core::{recolor, ChannelCount, Palette, PixelBuffer};

fn gradient(width: usize, height: usize, channels: ChannelCount) -> PixelBuffer {
    let mut raw = Vec::with_capacity(width * height * channels.get());
    for y in 0..height {
        for x in 0..width {
            raw.push((x * 255 / width.max(1)) as u8);
            raw.push((y * 255 / height.max(1)) as u8);
            raw.push(((x + y) * 7 % 256) as u8);
            if channels.has_alpha() {
                raw.push(if x % 3 == 0 { 0 } else { 255 });
            }
        }
    }
    PixelBuffer::from_raw(width, height, channels, raw).unwrap()
}

fn palettes_for(channels: ChannelCount) -> Vec<Palette> {
    all_palette_names()
        .iter()
        .map(|name| named_palette(name).unwrap().channels(channels).unwrap())
        .collect()
}

#[test]
fn every_output_pixel_is_a_palette_color() {
    for channels in [ChannelCount::Rgb, ChannelCount::Rgba] {
        let pixels = gradient(37, 23, channels);
        for palette in palettes_for(channels) {
            let out = recolor(&pixels, &palette).unwrap();
            let raw = out.into_raw();
            for pixel in raw.chunks_exact(channels.get()) {
                assert!(
                    palette.iter().any(|c| c == pixel),
                    "{:?} is not in the palette",
                    pixel
                );
            }
        }
    }
}

#[test]
fn recolor_is_idempotent() {
    for channels in [ChannelCount::Rgb, ChannelCount::Rgba] {
        let pixels = gradient(40, 16, channels);
        for palette in palettes_for(channels) {
            let once = recolor(&pixels, &palette).unwrap();
            let twice = recolor(&once, &palette).unwrap();
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn recolor_is_deterministic() {
    let pixels = gradient(64, 64, ChannelCount::Rgba);
    let palette = default_palette();
    let a = recolor(&pixels, &palette).unwrap();
    let b = recolor(&pixels, &palette).unwrap();
    assert_eq!(a.into_raw(), b.into_raw());
}

#[test]
fn shape_is_preserved() {
    for (width, height) in [(1, 1), (7, 3), (3, 7), (0, 4), (4, 0), (0, 0)] {
        for channels in [ChannelCount::Rgb, ChannelCount::Rgba] {
            let pixels = gradient(width, height, channels);
            let palette = default_palette().channels(channels).unwrap();
            let out = recolor(&pixels, &palette).unwrap();
            assert_eq!(out.width(), width);
            assert_eq!(out.height(), height);
            assert_eq!(out.channel_count(), channels);
        }
    }
}

#[test]
fn same_color_maps_to_same_output_everywhere() {
    let pixels = PixelBuffer::filled(19, 11, &[90, 140, 30, 255]).unwrap();
    let indices = nearest_indices(&pixels, &default_palette()).unwrap();
    let first = indices[[0, 0]];
    assert!(indices.iter().all(|&i| i == first));
}

#[test]
fn parallel_map_matches_per_pixel_scan() {
    let pixels = gradient(50, 30, ChannelCount::Rgb);
    let palette = default_palette().channels(ChannelCount::Rgb).unwrap();
    let indices = nearest_indices(&pixels, &palette).unwrap();
    for y in 0..pixels.height() {
        for x in 0..pixels.width() {
            let pixel = pixels.pixel(x, y).to_vec();
            assert_eq!(indices[[y, x]], nearest_index(&pixel, &palette).unwrap());
        }
    }
}

#[test]
fn duplicate_palette_entries_resolve_to_lowest_index() {
    let palette = Palette::from_rgba(&[
        [0, 0, 0, 255],
        [128, 128, 128, 255],
        [128, 128, 128, 255],
        [255, 255, 255, 255],
    ])
    .unwrap();
    let pixels = PixelBuffer::filled(4, 4, &[130, 126, 128, 255]).unwrap();
    let indices = nearest_indices(&pixels, &palette).unwrap();
    assert!(indices.iter().all(|&i| i == 1));
}

#[test]
fn reference_scenarios() {
    let palette = default_palette();
    assert_eq!(nearest_index(&[22, 22, 29, 255], &palette).unwrap(), 0);
    assert_eq!(nearest_index(&[0, 0, 0, 255], &palette).unwrap(), 0);

    let rgb = palette.channels(ChannelCount::Rgb).unwrap();
    let white = PixelBuffer::filled(5, 5, &[255, 255, 255]).unwrap();
    let out = recolor(&white, &rgb).unwrap();
    assert_eq!(out.channel_count(), ChannelCount::Rgb);
    assert!(out
        .into_raw()
        .chunks_exact(3)
        .all(|p| p == [220, 215, 186]));
}
