//! Hex color helpers used by the stylesheet builder.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Channels of a `#rrggbb` color (either case, no surrounding space).
pub fn parse_rrggbb(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let [_, r, g, b] = u32::from_str_radix(digits, 16).ok()?.to_be_bytes();
    Some([r, g, b])
}

/// Convert `#rrggbb` into `rgba(r,g,b,alpha)`.
///
/// Any other string is returned unchanged, so short hex, named colors and
/// `rgba(...)` values pass through.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    match parse_rrggbb(hex) {
        Some([r, g, b]) => format!("rgba({r},{g},{b},{alpha})"),
        None => hex.to_owned(),
    }
}
