//! Hex color parsing shared by the GUI and static renderers.

/// Fallback when a dataset carries an unparseable color.
pub const FALLBACK_RGB: (u8, u8, u8) = (114, 114, 114);

/// Parse `#rrggbb` or `#rgb`.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let mut channels = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        _ => None,
    }
}

pub fn rgb_or_fallback(value: &str) -> (u8, u8, u8) {
    parse_hex_color(value).unwrap_or(FALLBACK_RGB)
}
