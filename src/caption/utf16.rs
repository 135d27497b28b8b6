//! UTF-16 length and offset primitives.
//!
//! Telegram addresses entities in UTF-16 code units while Rust strings are
//! UTF-8, so every offset that leaves this crate is re-encoded here.
//! Characters outside the Basic Multilingual Plane count as two units.

/// Number of UTF-16 code units needed to encode `s`.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// UTF-16 offset of the cut point `cut` (a byte index) into `s`.
///
/// A cut past the end is treated as the end of `s`; a cut inside a multi-byte
/// character is moved back to that character's start.
pub fn utf16_offset(s: &str, cut: usize) -> usize {
    let cut = floor_char_boundary(s, cut);
    s.get(..cut).map_or(0, utf16_len)
}

/// Largest byte index whose UTF-16 prefix fits in `max_units`.
///
/// Never splits a surrogate pair: a character that would straddle the limit
/// is excluded entirely.
pub fn cut_at_units(s: &str, max_units: usize) -> usize {
    let mut units = 0usize;
    for (idx, ch) in s.char_indices() {
        let next = units.saturating_add(ch.len_utf16());
        if next > max_units {
            return idx;
        }
        units = next;
    }
    s.len()
}

fn floor_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut idx = idx;
    while !s.is_char_boundary(idx) {
        idx = idx.saturating_sub(1);
    }
    idx
}
