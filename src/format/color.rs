//! Conversions between float RGB triples and `#rrggbb` strings

/// Fallback for hex strings that do not parse
pub const NEUTRAL_GRAY: [f64; 3] = [0.5, 0.5, 0.5];

/// Encode [0, 1] channels as `#rrggbb`, rounding to the nearest byte.
///
/// Out-of-range channels clamp to 0 or 255.
pub fn rgb_to_hex(rgb: [f64; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Decode `#rrggbb` (leading `#` optional, any case) into [0, 1] channels.
///
/// Anything else decodes to [`NEUTRAL_GRAY`].
pub fn hex_to_rgb(hex: &str) -> [f64; 3] {
    parse_hex(hex).unwrap_or(NEUTRAL_GRAY)
}

fn parse_hex(hex: &str) -> Option<[f64; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([
        channel(0)? as f64 / 255.0,
        channel(2)? as f64 / 255.0,
        channel(4)? as f64 / 255.0,
    ])
}
