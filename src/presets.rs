//! Built-in palettes.

use crate::color::Color;
use crate::palette::Palette;

/// The 16-color palette by John A. Watlington
/// (alumni.media.mit.edu/~wad/color/palette.html).
pub const WATLINGTON_16: [Color; 16] = [
    Color::new(0, 0, 0),       // black
    Color::new(87, 87, 87),    // dark gray
    Color::new(173, 35, 35),   // red
    Color::new(42, 75, 215),   // blue
    Color::new(29, 105, 20),   // green
    Color::new(129, 74, 25),   // brown
    Color::new(129, 38, 192),  // purple
    Color::new(160, 160, 160), // light gray
    Color::new(129, 197, 122), // light green
    Color::new(157, 175, 255), // light blue
    Color::new(41, 208, 208),  // cyan
    Color::new(255, 146, 51),  // orange
    Color::new(255, 238, 51),  // yellow
    Color::new(233, 222, 187), // tan
    Color::new(255, 205, 243), // pink
    Color::new(255, 255, 255), // white
];

pub fn watlington16() -> Palette {
    palette_of(WATLINGTON_16.to_vec())
}

/// 256 colors made by blending every ordered pair `(a, b)` of
/// [`WATLINGTON_16`] as `0.33 * a + 0.67 * b`, truncated.
///
/// Entry `16 * i + j` blends color `i` into color `j`; the diagonal keeps the
/// 16 base colors up to rounding.
pub fn watlington_blend256() -> Palette {
    let mut colors = Vec::with_capacity(256);
    for a in WATLINGTON_16.iter() {
        for b in WATLINGTON_16.iter() {
            colors.push(Color::new(
                blend(a.r, b.r),
                blend(a.g, b.g),
                blend(a.b, b.b),
            ));
        }
    }
    palette_of(colors)
}

#[inline]
fn blend(a: u8, b: u8) -> u8 {
    (0.33 * a as f64 + 0.67 * b as f64) as u8
}

fn palette_of(colors: Vec<Color>) -> Palette {
    match Palette::new(colors) {
        Ok(palette) => palette,
        Err(e) => unreachable!("built-in palette is valid: {e}"),
    }
}
