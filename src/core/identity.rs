// ElasChat - core/identity.rs
//
// Avatar identity derivation: a deterministic background colour and
// initials pair for users without a profile image.
// Core layer: pure logic, no I/O.
//
// The hash and palette are compatibility constants. Changing either moves
// every existing name to a different colour, so both are versioned by
// `PALETTE_VERSION`.

use crate::util::constants::{AVATAR_PALETTE_RGB, MAX_INITIALS, PALETTE_SIZE};
use serde::Serialize;
use std::fmt;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Build from a packed 0xRRGGBB value.
    pub const fn from_rgb(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// Upper-case `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// The fixed avatar palette, in index order.
pub fn palette() -> [Color; PALETTE_SIZE] {
    AVATAR_PALETTE_RGB.map(Color::from_rgb)
}

/// Derived placeholder avatar for a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarIdentity {
    pub background_color: Color,

    /// The first two characters, upper-cased; empty for a blank name.
    /// Upper-casing can expand a character (`ß` becomes `SS`), so this may
    /// hold more than two characters.
    pub initials: String,
}

/// Derive the avatar identity for `name`.
///
/// Total over all strings, including the empty string.
pub fn identity(name: &str) -> AvatarIdentity {
    AvatarIdentity {
        background_color: color_for_name(name),
        initials: initials(name),
    }
}

/// Rolling name hash over UTF-16 code units.
///
/// Each step is `unit + ((hash << 5) - hash)` where the shift applies to the
/// signed 32-bit truncation of the accumulator, while the subtraction and
/// addition keep full width. This reproduces the mobile client's values for
/// every name, including long ones whose accumulator leaves the i32 range.
pub fn name_hash(name: &str) -> i64 {
    name.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = (hash as i32).wrapping_shl(5) as i64;
        (unit as i64).wrapping_add(shifted.wrapping_sub(hash))
    })
}

/// Palette colour for a display name.
pub fn color_for_name(name: &str) -> Color {
    let palette = palette();
    let index = name_hash(name).unsigned_abs() % palette.len() as u64;
    palette[index as usize]
}

/// Palette colour for a record id, keyed on its decimal digits.
///
/// Ids with no digits (or too many to fit in a u64) use the first colour.
pub fn color_for_id(id: &str) -> Color {
    let palette = palette();
    let digits: String = id.chars().filter(char::is_ascii_digit).collect();
    let value = digits.parse::<u64>().unwrap_or(0);
    palette[(value % palette.len() as u64) as usize]
}

/// Up to two initials for `name`, upper-cased after selection.
///
/// Two or more whitespace-separated parts take the first character of the
/// first two parts; otherwise the first two characters of the trimmed name.
pub fn initials(name: &str) -> String {
    let trimmed = name.trim();
    let mut parts = trimmed.split_whitespace();

    let raw: String = match (parts.next(), parts.next()) {
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect(),
        _ => trimmed.chars().take(MAX_INITIALS).collect(),
    };
    raw.to_uppercase()
}
