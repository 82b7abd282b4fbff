use std::fmt;

use crate::error::{RethemeError, Result};

/// Number of 8-bit channels per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelCount {
    Rgb,
    Rgba,
}

impl ChannelCount {
    pub const fn get(self) -> usize {
        match self {
            ChannelCount::Rgb => 3,
            ChannelCount::Rgba => 4,
        }
    }

    pub fn from_usize(n: usize) -> Result<Self> {
        match n {
            3 => Ok(ChannelCount::Rgb),
            4 => Ok(ChannelCount::Rgba),
            _ => Err(RethemeError::UnsupportedChannels(n)),
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, ChannelCount::Rgba)
    }
}

impl fmt::Display for ChannelCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelCount::Rgb => f.write_str("RGB"),
            ChannelCount::Rgba => f.write_str("RGBA"),
        }
    }
}

/// Parse "#RRGGBB" / "RRGGBB" into 3 channels or "#RRGGBBAA" / "RRGGBBAA" into 4.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let well_formed = (digits.len() == 6 || digits.len() == 8)
        && digits.bytes().all(|b| b.is_ascii_hexdigit());
    if !well_formed {
        return Err(RethemeError::InvalidHex(s.to_string()));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| RethemeError::InvalidHex(s.to_string()))
        })
        .collect()
}

/// Format a color as "#rrggbb" or "#rrggbbaa".
pub fn to_hex(color: &[u8]) -> String {
    let mut out = String::with_capacity(1 + color.len() * 2);
    out.push('#');
    for c in color {
        out.push_str(&format!("{:02x}", c));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_count_roundtrip() {
        assert_eq!(ChannelCount::from_usize(3).unwrap(), ChannelCount::Rgb);
        assert_eq!(ChannelCount::from_usize(4).unwrap(), ChannelCount::Rgba);
        assert_eq!(ChannelCount::Rgba.get(), 4);
        assert!(matches!(
            ChannelCount::from_usize(2),
            Err(RethemeError::UnsupportedChannels(2))
        ));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#16161D").unwrap(), vec![22, 22, 29]);
        assert_eq!(parse_hex("dcd7ba").unwrap(), vec![220, 215, 186]);
        assert_eq!(parse_hex("#16161DFF").unwrap(), vec![22, 22, 29, 255]);
        assert_eq!(parse_hex("  #FFFFFF ").unwrap(), vec![255, 255, 255]);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("ZZZ").is_err());
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
        assert!(parse_hex("#ééé").is_err());
        // from_str_radix alone would accept a sign on each pair
        assert!(parse_hex("#+f+f+f").is_err());
        assert!(parse_hex("+f+f+f+f").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[22, 22, 29]), "#16161d");
        assert_eq!(to_hex(&[22, 22, 29, 255]), "#16161dff");
    }
}
