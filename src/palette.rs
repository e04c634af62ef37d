//! Fixed color palettes.

use crate::color::{ChannelOrder, Color};
use crate::{Error, Result, BYTES_PER_PIXEL, MAX_PALETTE_LEN};

/// An ordered set of up to 256 colors.
///
/// A palette handed to [`PixelMapper`](crate::PixelMapper) is sorted in
/// place by ascending mean channel value; every index the mapper produces
/// refers to that sorted order. [`Palette::source_index`] keeps track of the
/// position each color had when the palette was created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
    source: Vec<u8>,
}

impl Palette {
    /// Creates a palette from a list of colors.
    ///
    /// Returns [`Error::EmptyPalette`] for an empty list and
    /// [`Error::PaletteTooLarge`] for more than 256 colors.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_LEN {
            return Err(Error::PaletteTooLarge { len: colors.len() });
        }

        let source = (0..colors.len()).map(|i| i as u8).collect();
        Ok(Self { colors, source })
    }

    /// Creates a palette from packed 4-byte colors in the given channel order.
    pub fn from_packed(data: &[u8], order: ChannelOrder) -> Result<Self> {
        if data.len() % BYTES_PER_PIXEL != 0 {
            return Err(Error::InvalidPaletteData(format!(
                "{} bytes is not a multiple of {}",
                data.len(),
                BYTES_PER_PIXEL
            )));
        }

        let colors = data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|c| order.unpack([c[0], c[1], c[2], c[3]]))
            .collect();
        Self::new(colors)
    }

    /// Sorts ascending by mean channel value.
    ///
    /// Equal means are ordered by channel sum, then by current position, so
    /// channel sums are non-decreasing along the palette as well.
    pub(crate) fn sort_by_mean(&mut self) {
        let mut order: Vec<usize> = (0..self.colors.len()).collect();
        order.sort_by_key(|&i| {
            let c = &self.colors[i];
            (c.mean(), c.channel_sum())
        });

        self.colors = order.iter().map(|&i| self.colors[i]).collect();
        self.source = order.iter().map(|&i| self.source[i]).collect();
    }

    pub fn is_sorted_by_mean(&self) -> bool {
        self.colors
            .windows(2)
            .all(|w| (w[0].mean(), w[0].channel_sum()) <= (w[1].mean(), w[1].channel_sum()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Color {
        self.colors[index]
    }

    /// Position the color at `index` had when the palette was created.
    #[inline]
    pub fn source_index(&self, index: usize) -> usize {
        self.source[index] as usize
    }

    /// Packs every color in the given channel order.
    pub fn to_packed(&self, order: ChannelOrder) -> Vec<u8> {
        self.colors.iter().flat_map(|&c| order.pack(c)).collect()
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = Error;

    fn try_from(colors: Vec<Color>) -> Result<Self> {
        Self::new(colors)
    }
}

impl TryFrom<&[Color]> for Palette {
    type Error = Error;

    fn try_from(colors: &[Color]) -> Result<Self> {
        Self::new(colors.to_vec())
    }
}
