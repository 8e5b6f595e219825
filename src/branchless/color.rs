//! Branchless Palette Parsing
//!
//! Star and sequence palettes are written as hex strings so they read like
//! the astronomy tables they come from. Parsing uses arithmetic instead of
//! if/else chains per character:
//!   offset = is_digit * (b - '0') + is_lower * (b - 'a' + 10) + is_upper * (b - 'A' + 10)

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// Normalized RGB (alpha dropped), the form the point buffers store.
    #[inline(always)]
    pub fn to_rgb_f32(self) -> [f32; 3] {
        const INV_255: f32 = 1.0 / 255.0; // Division exorcism
        [
            self.r as f32 * INV_255,
            self.g as f32 * INV_255,
            self.b as f32 * INV_255,
        ]
    }
}

/// Realistic stellar colors by spectral class.
pub const STAR_PALETTE_HEX: [&str; 7] = [
    "#9bb0ff", // O - Blue
    "#aabfff", // B - Blue-White
    "#cad7ff", // A - White
    "#f8f7ff", // F - Yellow-White
    "#fff4ea", // G - Yellow
    "#ffd2a1", // K - Orange
    "#ffcc6f", // M - Red
];

/// Per-word highlight colors, cycled by word position.
pub const SEQUENCE_COLORS: [[f32; 3]; 6] = [
    [1.0, 0.2, 0.2], // Red
    [0.2, 1.0, 0.2], // Green
    [0.2, 0.5, 1.0], // Blue
    [1.0, 1.0, 0.2], // Yellow
    [1.0, 0.2, 1.0], // Magenta
    [0.2, 1.0, 1.0], // Cyan
];

/// Beam tint (cyan, boosted past 1.0 for the glow).
pub const BEAM_COLOR: [f32; 3] = [0.0, 1.5, 1.5];

/// Highlight color for the word at `position` in the sequence.
#[inline]
pub fn sequence_color(position: usize) -> [f32; 3] {
    SEQUENCE_COLORS[position % SEQUENCE_COLORS.len()]
}

/// The stellar palette as normalized RGB.
pub fn star_palette() -> [[f32; 3]; 7] {
    STAR_PALETTE_HEX.map(|hex| parse_hex_color(hex).to_rgb_f32())
}

/// Hex character → 4-bit value, BRANCHLESS.
///
///   is_digit = (b - '0') < 10           → 0 or 1
///   is_lower = (b - 'a') < 6            → 0 or 1
///   is_upper = (b - 'A') < 6            → 0 or 1
#[inline(always)]
fn hex_digit_branchless(b: u8) -> u8 {
    let is_digit = (b.wrapping_sub(b'0') < 10) as u8;
    let is_lower = (b.wrapping_sub(b'a') < 6) as u8;
    let is_upper = (b.wrapping_sub(b'A') < 6) as u8;

    let digit_val = b.wrapping_sub(b'0');
    let lower_val = b.wrapping_sub(b'a').wrapping_add(10);
    let upper_val = b.wrapping_sub(b'A').wrapping_add(10);

    is_digit.wrapping_mul(digit_val)
        .wrapping_add(is_lower.wrapping_mul(lower_val))
        .wrapping_add(is_upper.wrapping_mul(upper_val))
}

#[inline(always)]
fn hex_byte_branchless(hi: u8, lo: u8) -> u8 {
    (hex_digit_branchless(hi) << 4) | hex_digit_branchless(lo)
}

/// Parse `#RGB` or `#RRGGBB`.
///
/// Returns Rgba::BLACK on invalid input (no error branch, just default).
pub fn parse_hex_color(s: &str) -> Rgba {
    let bytes = s.as_bytes();
    let len = bytes.len();

    if len == 0 || bytes[0] != b'#' {
        return Rgba::BLACK;
    }

    match len {
        4 => {
            let r = hex_digit_branchless(bytes[1]);
            let g = hex_digit_branchless(bytes[2]);
            let b = hex_digit_branchless(bytes[3]);
            Rgba {
                r: r << 4 | r,
                g: g << 4 | g,
                b: b << 4 | b,
                a: 255,
            }
        }
        7 => Rgba {
            r: hex_byte_branchless(bytes[1], bytes[2]),
            g: hex_byte_branchless(bytes[3], bytes[4]),
            b: hex_byte_branchless(bytes[5], bytes[6]),
            a: 255,
        },
        _ => Rgba::BLACK,
    }
}

/// Scale an RGB triple (no clamping).
#[inline(always)]
pub fn scale_rgb(c: [f32; 3], k: f32) -> [f32; 3] {
    [c[0] * k, c[1] * k, c[2] * k]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_digit_branchless() {
        assert_eq!(hex_digit_branchless(b'0'), 0);
        assert_eq!(hex_digit_branchless(b'9'), 9);
        assert_eq!(hex_digit_branchless(b'a'), 10);
        assert_eq!(hex_digit_branchless(b'F'), 15);
    }

    #[test]
    fn parses_spectral_classes() {
        assert_eq!(
            parse_hex_color("#9bb0ff"),
            Rgba { r: 0x9b, g: 0xb0, b: 0xff, a: 255 }
        );
        assert_eq!(
            parse_hex_color("#FFCC6F"),
            Rgba { r: 0xff, g: 0xcc, b: 0x6f, a: 255 }
        );
    }

    #[test]
    fn short_form_and_garbage() {
        assert_eq!(parse_hex_color("#F80"), Rgba { r: 255, g: 136, b: 0, a: 255 });
        assert_eq!(parse_hex_color("9bb0ff"), Rgba::BLACK);
        assert_eq!(parse_hex_color("#12345"), Rgba::BLACK);
    }

    #[test]
    fn palette_is_normalized() {
        let palette = star_palette();
        assert_eq!(palette.len(), 7);
        for c in palette {
            for ch in c {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
        // O-class is the bluest
        assert!(palette[0][2] > palette[0][0]);
        assert!((palette[0][2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sequence_color_cycles() {
        assert_eq!(sequence_color(0), SEQUENCE_COLORS[0]);
        assert_eq!(sequence_color(6), SEQUENCE_COLORS[0]);
        assert_eq!(sequence_color(8), SEQUENCE_COLORS[2]);
    }
}
