//! Accelerated nearest-palette-color mapping.
//!
//! For every pixel the mapper predicts a starting palette entry from the
//! pixel's mean channel value, then walks outward through the mean-sorted
//! palette in both directions. Three tests keep the walk short:
//!
//! - **Mean gap**: `|sum(p) - sum(c)|^2 <= 3 * sed(p, c)`, so a candidate whose
//!   channel sum is too far from the pixel's cannot win. Channel sums grow
//!   along the palette, so once the gap is too large on the far side of the
//!   pixel the whole direction is finished.
//! - **Triangle inequality**: if `dist(best, c) > 4 * sed(p, best)` then
//!   `sed(p, c) > sed(p, best)`, so `c` is skipped without touching the pixel.
//! - **Partial distance search**: channel terms are accumulated one at a time
//!   and the candidate is dropped as soon as the partial sum exceeds the best.
//!
//! All three only drop candidates that are strictly farther than the current
//! best, and equal distances resolve to the lower index, so the result is
//! exactly that of [`PixelMapper::full_search_nearest_index`]: the lowest
//! palette index among the nearest colors.

use crate::buffer::{IndexImage, PixelBuffer};
use crate::color::{ChannelOrder, Color};
use crate::palette::Palette;
use crate::tables::{MeanIndexLut, PaletteDistances, SquaresLut};
use crate::{Error, Result, BYTES_PER_PIXEL};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Options for [`PixelMapper::with_options`].
#[derive(Clone, Debug, Default)]
pub struct MapperOptions {
    /// Byte order of the pixel buffers this mapper will read.
    pub channel_order: ChannelOrder,
}

/// Maps pixels to the nearest color of a fixed palette.
///
/// Construction sorts the palette and precomputes its lookup tables; after
/// that the mapper is immutable and can be shared between threads.
#[derive(Clone, Debug)]
pub struct PixelMapper {
    palette: Palette,
    packed: Vec<[u8; 4]>,
    sums: Vec<u32>,
    lut: MeanIndexLut,
    squares: SquaresLut,
    distances: PaletteDistances,
    options: MapperOptions,
}

#[derive(Clone, Copy)]
struct Best {
    index: usize,
    sed: u32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Towards higher indices, larger channel sums
    Down,
    /// Towards lower indices, smaller channel sums
    Up,
}

impl PixelMapper {
    /// Creates a mapper for RGBA pixel buffers.
    pub fn new(palette: Palette) -> Result<Self> {
        Self::with_options(palette, MapperOptions::default())
    }

    /// Creates a mapper, taking ownership of `palette` and sorting it by
    /// ascending mean channel value.
    ///
    /// Returns [`Error::EmptyPalette`] or [`Error::PaletteTooLarge`] for an
    /// unusable palette and [`Error::MeanLut`] if the prediction table cannot
    /// be built.
    pub fn with_options(mut palette: Palette, options: MapperOptions) -> Result<Self> {
        if palette.is_empty() {
            return Err(Error::EmptyPalette);
        }
        if palette.len() > crate::MAX_PALETTE_LEN {
            return Err(Error::PaletteTooLarge { len: palette.len() });
        }

        palette.sort_by_mean();

        let means: Vec<u8> = palette.colors().iter().map(Color::mean).collect();
        let lut = MeanIndexLut::build(&means)?;
        let squares = SquaresLut::new();
        let distances = PaletteDistances::build(palette.colors(), &squares);

        let order = options.channel_order;
        let packed = palette.colors().iter().map(|&c| order.pack(c)).collect();
        let sums = palette.colors().iter().map(Color::channel_sum).collect();

        tracing::debug!(
            colors = palette.len(),
            min_mean = means[0],
            max_mean = means[means.len() - 1],
            channel_order = ?order,
            "pixel mapper tables initialized"
        );

        Ok(Self {
            palette,
            packed,
            sums,
            lut,
            squares,
            distances,
            options,
        })
    }

    /// The palette, sorted by mean. Output indices refer to this order.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_len(&self) -> usize {
        self.packed.len()
    }

    pub fn mean_lut(&self) -> &MeanIndexLut {
        &self.lut
    }

    pub fn distances(&self) -> &PaletteDistances {
        &self.distances
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Index of the nearest palette color.
    pub fn nearest_index(&self, color: Color) -> u8 {
        self.nearest_packed(self.options.channel_order.pack(color)) as u8
    }

    /// Index of the nearest palette color by exhaustive search.
    pub fn full_search_nearest_index(&self, color: Color) -> u8 {
        self.full_search_packed(self.options.channel_order.pack(color)) as u8
    }

    /// Maps every pixel of `image` using the accelerated search.
    pub fn convert_image(&self, image: &PixelBuffer<'_>) -> Result<IndexImage> {
        let mut indices = vec![0u8; image.width() * image.height()];
        self.map_rows(image, &mut indices, Self::nearest_packed);
        Ok(IndexImage::from_raw(image.width(), image.height(), indices))
    }

    /// Like [`convert_image`](Self::convert_image) but writes into `out`,
    /// which must hold exactly `width * height` bytes.
    pub fn convert_image_into(&self, image: &PixelBuffer<'_>, out: &mut [u8]) -> Result<()> {
        let expected = image.width() * image.height();
        if out.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: out.len(),
            });
        }
        self.map_rows(image, out, Self::nearest_packed);
        Ok(())
    }

    /// Maps every pixel of `image` by comparing it against every palette
    /// color. Produces the same output as [`convert_image`](Self::convert_image).
    pub fn full_search_convert_image(&self, image: &PixelBuffer<'_>) -> Result<IndexImage> {
        let mut indices = vec![0u8; image.width() * image.height()];
        self.map_rows(image, &mut indices, Self::full_search_packed);
        Ok(IndexImage::from_raw(image.width(), image.height(), indices))
    }

    /// Row-parallel [`convert_image`](Self::convert_image) on the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn par_convert_image(&self, image: &PixelBuffer<'_>) -> Result<IndexImage> {
        let width = image.width();
        let mut indices = vec![0u8; width * image.height()];

        tracing::trace!(width, height = image.height(), "parallel pixel mapping");
        indices
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, out)| self.map_row(image.row(y), out, Self::nearest_packed));

        Ok(IndexImage::from_raw(width, image.height(), indices))
    }

    fn map_rows<F>(&self, image: &PixelBuffer<'_>, out: &mut [u8], search: F)
    where
        F: Fn(&Self, [u8; 4]) -> usize + Copy,
    {
        tracing::trace!(
            width = image.width(),
            height = image.height(),
            stride = image.stride(),
            "pixel mapping"
        );
        for (y, row) in out.chunks_exact_mut(image.width()).enumerate() {
            self.map_row(image.row(y), row, search);
        }
    }

    #[inline]
    fn map_row<F>(&self, src: &[u8], out: &mut [u8], search: F)
    where
        F: Fn(&Self, [u8; 4]) -> usize,
    {
        for (px, index) in src.chunks_exact(BYTES_PER_PIXEL).zip(out.iter_mut()) {
            *index = search(self, [px[0], px[1], px[2], px[3]]) as u8;
        }
    }

    fn full_search_packed(&self, px: [u8; 4]) -> usize {
        let mut best = Best {
            index: 0,
            sed: u32::MAX,
        };
        for (k, c) in self.packed.iter().enumerate() {
            let sed = self.sed(&px, c);
            if sed < best.sed {
                best = Best { index: k, sed };
            }
        }
        best.index
    }

    fn nearest_packed(&self, px: [u8; 4]) -> usize {
        let px_sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
        let predicted = self.lut.predict((px_sum / 3) as u8);

        let mut best = Best {
            index: predicted,
            sed: self.sed(&px, &self.packed[predicted]),
        };

        let len = self.packed.len();
        let mut down = predicted;
        let mut up = predicted;
        let mut scan_down = down + 1 < len;
        let mut scan_up = up > 0;

        while scan_down || scan_up {
            if scan_down {
                down += 1;
                scan_down = self.visit(&px, px_sum, down, Direction::Down, &mut best) && down + 1 < len;
            }
            if scan_up {
                up -= 1;
                scan_up = self.visit(&px, px_sum, up, Direction::Up, &mut best) && up > 0;
            }
        }

        best.index
    }

    /// Tests one candidate. Returns `false` once nothing further in
    /// `direction` can beat the current best.
    #[inline(always)]
    fn visit(
        &self,
        px: &[u8; 4],
        px_sum: u32,
        candidate: usize,
        direction: Direction,
        best: &mut Best,
    ) -> bool {
        let sum = self.sums[candidate];

        if 3 * best.sed < self.squares.sum_gap(px_sum, sum) {
            let beyond = match direction {
                Direction::Down => sum >= px_sum,
                Direction::Up => sum <= px_sum,
            };
            return !beyond;
        }

        if 4 * best.sed < self.distances.get(best.index, candidate) {
            return true;
        }

        let c = &self.packed[candidate];
        let mut sed = self.squares.channel(px[0], c[0]);
        if sed > best.sed {
            return true;
        }
        sed += self.squares.channel(px[1], c[1]);
        if sed > best.sed {
            return true;
        }
        sed += self.squares.channel(px[2], c[2]);
        if sed < best.sed || (sed == best.sed && candidate < best.index) {
            *best = Best {
                index: candidate,
                sed,
            };
        }
        true
    }

    #[inline(always)]
    fn sed(&self, a: &[u8; 4], b: &[u8; 4]) -> u32 {
        self.squares.channel(a[0], b[0]) + self.squares.channel(a[1], b[1]) + self.squares.channel(a[2], b[2])
    }
}
