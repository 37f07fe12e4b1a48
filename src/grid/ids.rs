// src/grid/ids.rs
//! Human-readable hex ids (A1, B3, C5 ...) derived from axial coordinates

use super::Axial;

/// Encode an axial coordinate as a readable grid id.
///
/// `col = q + offset` selects a letter (`A` + col), `row = r + offset` a
/// 1-based number, with `offset = radius + 1` keeping both positive. The
/// mapping is a bijection over `[-radius, radius]` on both axes as long as
/// the column stays within A..Z (radius ≤ 12). Callers are responsible for
/// keeping `q`, `r` in range; out-of-range input yields non-alphabetic
/// garbage rather than an error.
pub fn axial_to_id(q: i32, r: i32, radius: i32) -> String {
    let offset = radius + 1;
    let col = q + offset;
    let row = r + offset;
    let letter = (b'A' as i32 + col) as u8 as char;
    format!("{}{}", letter, row + 1)
}

/// Decode a grid id back to its axial coordinate.
///
/// Inverse of [`axial_to_id`] over the bijective range; returns `None` for
/// malformed ids and for coordinates outside the hexagonal range. This is
/// the guarded entry point for user-typed ids.
pub fn id_to_axial(id: &str, radius: i32) -> Option<Axial> {
    let mut chars = id.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_uppercase() {
        return None;
    }

    let row_digits = chars.as_str();
    if row_digits.is_empty() || !row_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let row: i32 = row_digits.parse().ok()?;

    let offset = radius + 1;
    let q = (letter as i32 - 'A' as i32) - offset;
    let r = (row - 1) - offset;

    let coord = Axial::new(q, r);
    if coord.in_range(radius) {
        Some(coord)
    } else {
        None
    }
}
