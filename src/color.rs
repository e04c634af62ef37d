//! Color value type and packed channel orders.

use std::fmt;

/// RGBA color. Alpha is carried along but ignored by every distance.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color from its red, green and blue channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Sum of the three color channels (0..=765).
    #[inline]
    pub fn channel_sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// Mean of the three color channels, truncated.
    #[inline]
    pub fn mean(&self) -> u8 {
        (self.channel_sum() / 3) as u8
    }

    /// Squared Euclidean distance over the three color channels.
    #[inline]
    pub fn distance_sq(&self, other: &Color) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Red: {}, Green: {}, Blue: {}, Mean: {}",
            self.r,
            self.g,
            self.b,
            self.mean()
        )
    }
}

/// Byte order of a packed 4-byte pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelOrder {
    /// R, G, B, A: what the `image` crate produces
    #[default]
    Rgba,
    /// B, G, R, A: what FFmpeg's `AV_PIX_FMT_BGRA` scalers produce
    Bgra,
}

impl ChannelOrder {
    /// Packs a color into four bytes in this order.
    #[inline]
    pub fn pack(self, color: Color) -> [u8; 4] {
        match self {
            ChannelOrder::Rgba => [color.r, color.g, color.b, color.a],
            ChannelOrder::Bgra => [color.b, color.g, color.r, color.a],
        }
    }

    /// Reads a color from four bytes in this order.
    #[inline]
    pub fn unpack(self, px: [u8; 4]) -> Color {
        match self {
            ChannelOrder::Rgba => Color::with_alpha(px[0], px[1], px[2], px[3]),
            ChannelOrder::Bgra => Color::with_alpha(px[2], px[1], px[0], px[3]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_truncates() {
        assert_eq!(Color::new(127, 127, 128).mean(), 127);
        assert_eq!(Color::new(255, 255, 255).mean(), 255);
        assert_eq!(Color::new(1, 1, 0).mean(), 0);
    }

    #[test]
    fn test_distance_ignores_alpha() {
        let a = Color::with_alpha(10, 20, 30, 0);
        let b = Color::with_alpha(13, 16, 30, 255);
        assert_eq!(a.distance_sq(&b), 9 + 16);
        assert_eq!(b.distance_sq(&a), 25);
    }

    #[test]
    fn test_channel_order_pack() {
        let c = Color::with_alpha(1, 2, 3, 4);
        assert_eq!(ChannelOrder::Rgba.pack(c), [1, 2, 3, 4]);
        assert_eq!(ChannelOrder::Bgra.pack(c), [3, 2, 1, 4]);
        assert_eq!(ChannelOrder::Bgra.unpack([3, 2, 1, 4]), c);
    }
}
