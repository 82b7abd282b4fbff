/// Fixed color themes used as the only allowed output colors.
///
/// Built-in tables are stored as RGBA. An image without alpha gets the
/// 3-channel view of the same table through [`Palette::channels`], so the two
/// widths can never drift apart.
use log::debug;

use crate::color::{parse_hex, to_hex, ChannelCount};
use crate::error::{RethemeError, Result};

// Kanagawa (reference theme)
pub const KANAGAWA: [[u8; 4]; 24] = [
    [22, 22, 29, 255],    // #16161D - sumiInk0
    [30, 31, 40, 255],    // #1E1F28 - sumiInk1
    [42, 42, 55, 255],    // #2A2A37 - sumiInk3
    [54, 54, 70, 255],    // #363646 - sumiInk4
    [84, 84, 109, 255],   // #54546D - sumiInk6
    [220, 215, 186, 255], // #DCD7BA - fujiWhite
    [34, 50, 73, 255],    // #223249 - waveBlue1
    [45, 79, 103, 255],   // #2D4F67 - waveBlue2
    [147, 138, 169, 255], // #938AA9 - springViolet1
    [149, 127, 184, 255], // #957FB8 - oniViolet
    [126, 156, 216, 255], // #7E9CD8 - crystalBlue
    [122, 168, 159, 255], // #7AA89F - waveAqua2
    [210, 126, 153, 255], // #D27E99 - sakuraPink
    [232, 36, 36, 255],   // #E82424 - samuraiRed
    [127, 180, 202, 255], // #7FB4CA - springBlue
    [152, 187, 108, 255], // #98BB6C - springGreen
    [228, 104, 118, 255], // #E46876 - waveRed
    [255, 160, 102, 255], // #FFA066 - surimiOrange
    [106, 149, 137, 255], // #6A9589 - waveAqua1
    [230, 195, 132, 255], // #E6C384 - carpYellow
    [192, 163, 110, 255], // #C0A36E - boatYellow2
    [255, 93, 98, 255],   // #FF5D62 - peachRed
    [156, 171, 202, 255], // #9CABCA - springViolet2
    [101, 133, 148, 255], // #658594 - dragonBlue
];

// Nord: polar night, snow storm, frost, aurora
pub const NORD: [[u8; 4]; 16] = [
    [46, 52, 64, 255],    // #2E3440
    [59, 66, 82, 255],    // #3B4252
    [67, 76, 94, 255],    // #434C5E
    [76, 86, 106, 255],   // #4C566A
    [216, 222, 233, 255], // #D8DEE9
    [229, 233, 240, 255], // #E5E9F0
    [236, 239, 244, 255], // #ECEFF4
    [143, 188, 187, 255], // #8FBCBB
    [136, 192, 208, 255], // #88C0D0
    [129, 161, 193, 255], // #81A1C1
    [94, 129, 172, 255],  // #5E81AC
    [191, 97, 106, 255],  // #BF616A
    [208, 135, 112, 255], // #D08770
    [235, 203, 139, 255], // #EBCB8B
    [163, 190, 140, 255], // #A3BE8C
    [180, 142, 173, 255], // #B48EAD
];

// Gruvbox dark, normal + bright
pub const GRUVBOX: [[u8; 4]; 16] = [
    [40, 40, 40, 255],    // #282828 - bg
    [204, 36, 29, 255],   // #CC241D - red
    [152, 151, 26, 255],  // #98971A - green
    [215, 153, 33, 255],  // #D79921 - yellow
    [69, 133, 136, 255],  // #458588 - blue
    [177, 98, 134, 255],  // #B16286 - purple
    [104, 157, 106, 255], // #689D6A - aqua
    [168, 153, 132, 255], // #A89984 - gray
    [146, 131, 116, 255], // #928374 - gray
    [251, 73, 52, 255],   // #FB4934 - bright red
    [184, 187, 38, 255],  // #B8BB26 - bright green
    [250, 189, 47, 255],  // #FABD2F - bright yellow
    [131, 165, 152, 255], // #83A598 - bright blue
    [211, 134, 155, 255], // #D3869B - bright purple
    [142, 192, 124, 255], // #8EC07C - bright aqua
    [235, 219, 178, 255], // #EBDBB2 - fg
];

pub const DEFAULT_PALETTE_NAME: &str = "kanagawa";

/// An ordered, non-empty set of colors sharing one channel count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    data: Vec<u8>,
    channels: ChannelCount,
}

impl Palette {
    /// Build from a flat `len * channels` byte buffer.
    pub fn new(data: Vec<u8>, channels: ChannelCount) -> Result<Self> {
        if data.is_empty() {
            return Err(RethemeError::EmptyPalette);
        }
        let width = channels.get();
        if data.len() % width != 0 {
            return Err(RethemeError::BufferShape {
                len: data.len(),
                width: data.len() / width,
                height: 1,
                channels: width,
            });
        }
        Ok(Self { data, channels })
    }

    pub fn from_rgba(colors: &[[u8; 4]]) -> Result<Self> {
        Self::new(colors.concat(), ChannelCount::Rgba)
    }

    pub fn from_rgb(colors: &[[u8; 3]]) -> Result<Self> {
        Self::new(colors.concat(), ChannelCount::Rgb)
    }

    /// Parse a list of hex colors. `RRGGBB` entries give an RGB palette,
    /// `RRGGBBAA` entries an RGBA one.
    pub fn from_hex_list<S: AsRef<str>>(hexes: &[S]) -> Result<Self> {
        let mut data = Vec::new();
        let mut width = None;
        for hex in hexes {
            let color = parse_hex(hex.as_ref())?;
            match width {
                None => width = Some(color.len()),
                Some(w) if w != color.len() => return Err(RethemeError::MixedHexWidths),
                Some(_) => {}
            }
            data.extend_from_slice(&color);
        }
        let channels = ChannelCount::from_usize(width.ok_or(RethemeError::EmptyPalette)?)?;
        Self::new(data, channels)
    }

    /// Keep only the first `width` channels of each entry, same order and count.
    pub fn channels(&self, width: ChannelCount) -> Result<Palette> {
        let available = self.channels.get();
        let requested = width.get();
        if requested > available {
            return Err(RethemeError::ChannelProjection {
                requested,
                available,
            });
        }
        if requested == available {
            return Ok(self.clone());
        }

        debug!(
            "projecting {}-color palette from {} to {}",
            self.len(),
            self.channels,
            width
        );
        let data = self
            .iter()
            .flat_map(|color| color[..requested].iter().copied())
            .collect();
        Ok(Palette {
            data,
            channels: width,
        })
    }

    /// RGBA view of the palette: RGB entries gain an opaque alpha channel,
    /// RGBA entries are returned unchanged.
    pub fn opaque(&self) -> Palette {
        match self.channels {
            ChannelCount::Rgba => self.clone(),
            ChannelCount::Rgb => Palette {
                data: self
                    .iter()
                    .flat_map(|color| color.iter().copied().chain(std::iter::once(u8::MAX)))
                    .collect(),
                channels: ChannelCount::Rgba,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.data.len() / self.channels.get()
    }

    /// Always false: construction rejects empty palettes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn channel_count(&self) -> ChannelCount {
        self.channels
    }

    /// Entry at `index`. Panics when out of range, like slice indexing.
    pub fn color(&self, index: usize) -> &[u8] {
        let width = self.channels.get();
        &self.data[index * width..(index + 1) * width]
    }

    pub fn iter(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels.get())
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.iter().map(to_hex).collect()
    }
}

fn builtin_table(name: &str) -> Option<&'static [[u8; 4]]> {
    match name {
        "kanagawa" => Some(&KANAGAWA),
        "nord" => Some(&NORD),
        "gruvbox" => Some(&GRUVBOX),
        _ => None,
    }
}

pub fn named_palette(name: &str) -> Option<Palette> {
    builtin_table(&name.to_lowercase()).and_then(|table| Palette::from_rgba(table).ok())
}

pub fn all_palette_names() -> &'static [&'static str] {
    &["kanagawa", "nord", "gruvbox"]
}

/// The reference theme.
pub fn default_palette() -> Palette {
    Palette {
        data: KANAGAWA.concat(),
        channels: ChannelCount::Rgba,
    }
}
