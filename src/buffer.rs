//! Pixel buffers in and index buffers out.

use crate::color::ChannelOrder;
use crate::palette::Palette;
use crate::{Error, Result, BYTES_PER_PIXEL, ROW_ALIGNMENT_PIXELS};

/// Borrowed 4-byte-per-pixel image with an explicit row stride.
///
/// The stride is counted in pixels. Rows may carry padding after their
/// `width` pixels; padding bytes are never read.
#[derive(Clone, Copy, Debug)]
pub struct PixelBuffer<'data> {
    data: &'data [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'data> PixelBuffer<'data> {
    /// Creates a buffer with tightly packed rows.
    ///
    /// Returns [`Error::BufferSizeMismatch`] unless `data` holds exactly
    /// `width * height * 4` bytes, and [`Error::InvalidDimensions`] when that
    /// size is zero or does not fit in `usize`.
    pub fn new(data: &'data [u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(Error::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            stride: width,
        })
    }

    /// Creates a buffer whose rows are padded to a multiple of 32 pixels,
    /// i.e. each row carries `(32 - width % 32) % 32` extra pixels.
    pub fn padded(data: &'data [u8], width: usize, height: usize) -> Result<Self> {
        let stride = padded_stride(width).ok_or(Error::InvalidDimensions { width, height })?;
        Self::with_stride(data, width, height, stride)
    }

    /// Creates a buffer with rows `stride` pixels apart.
    ///
    /// The padding of the last row may be omitted, so `data` must hold
    /// between `stride * (height - 1) + width` and `stride * height` pixels.
    pub fn with_stride(
        data: &'data [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if stride < width {
            return Err(Error::InvalidStride { width, stride });
        }

        let expected = stride
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL));
        let minimum = stride
            .checked_mul(height - 1)
            .and_then(|n| n.checked_add(width))
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL));
        let (Some(expected), Some(minimum)) = (expected, minimum) else {
            return Err(Error::InvalidDimensions { width, height });
        };
        if data.len() < minimum || data.len() > expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in pixels.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_padded(&self) -> bool {
        self.stride != self.width
    }

    /// The `width * 4` bytes of pixel data in row `row`, without padding.
    #[inline]
    pub fn row(&self, row: usize) -> &'data [u8] {
        let start = row * self.stride * BYTES_PER_PIXEL;
        &self.data[start..start + self.width * BYTES_PER_PIXEL]
    }

    /// Packed bytes of the pixel at (`row`, `col`).
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 4] {
        let offset = (row * self.stride + col) * BYTES_PER_PIXEL;
        let px = &self.data[offset..offset + BYTES_PER_PIXEL];
        [px[0], px[1], px[2], px[3]]
    }
}

/// Stride in pixels of a row padded to [`ROW_ALIGNMENT_PIXELS`], or `None`
/// if it does not fit in `usize`.
#[inline]
pub fn padded_stride(width: usize) -> Option<usize> {
    width.checked_add((ROW_ALIGNMENT_PIXELS - width % ROW_ALIGNMENT_PIXELS) % ROW_ALIGNMENT_PIXELS)
}

/// One palette index per pixel, rows tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexImage {
    width: usize,
    height: usize,
    indices: Vec<u8>,
}

impl IndexImage {
    pub(crate) fn from_raw(width: usize, height: usize, indices: Vec<u8>) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        Self {
            width,
            height,
            indices,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.indices[row * self.width + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        &self.indices[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.indices.chunks_exact(self.width)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.indices
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.indices
    }

    /// Expands the indices back to packed colors of `palette`.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside `palette`.
    pub fn to_packed(&self, palette: &Palette, order: ChannelOrder) -> Vec<u8> {
        let lut: Vec<[u8; 4]> = palette.colors().iter().map(|&c| order.pack(c)).collect();
        self.indices
            .iter()
            .flat_map(|&i| lut[i as usize])
            .collect()
    }

    /// Expands the indices back to RGBA bytes of `palette`.
    pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
        self.to_packed(palette, ChannelOrder::Rgba)
    }
}
