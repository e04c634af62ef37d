//! # fastpixelmap
//!
//! Maps full-color images onto a fixed palette of up to 256 colors (RGB to
//! pal8), returning one palette index per pixel.
//!
//! ## Features
//!
//! - **Accelerated search**: mean-value prediction, partial distance search
//!   and triangle-inequality elimination (Yu-Chen Hu and B.-H. Su) prune
//!   almost every palette entry per pixel
//! - **Full search**: an exhaustive reference variant with identical output
//! - **Padded rows**: buffers with rows aligned to 32 pixels, as produced by
//!   FFmpeg scalers, are read without copying
//! - **Parallel mapping**: row-parallel conversion through rayon (feature
//!   `parallel`, enabled by default)
//!
//! ## Quick Start
//!
//! ```ignore
//! use fastpixelmap::{presets, PixelBuffer, PixelMapper};
//!
//! let mapper = PixelMapper::new(presets::watlington_blend256())?;
//!
//! // RGBA image data (4 bytes per pixel)
//! let rgba = vec![255u8, 0, 0, 255, 0, 255, 0, 255];
//! let image = PixelBuffer::new(&rgba, 2, 1)?;
//! let indexed = mapper.convert_image(&image)?;
//!
//! let color = mapper.palette().get(indexed.get(0, 0) as usize);
//! ```
//!
//! Indices refer to the mapper's palette, which is sorted by mean channel
//! value during construction. Use [`PixelMapper::palette`] to look colors up
//! and [`Palette::source_index`] to recover the caller's original ordering.

use thiserror::Error;

pub mod buffer;
pub mod color;
pub mod mapper;
pub mod palette;
pub mod presets;
pub mod tables;

pub use buffer::{IndexImage, PixelBuffer};
pub use color::{ChannelOrder, Color};
pub use mapper::{MapperOptions, PixelMapper};
pub use palette::Palette;
pub use tables::{MeanIndexLut, PaletteDistances, SquaresLut};

/// Errors that can occur while building a mapper or mapping an image.
#[derive(Debug, Error)]
pub enum Error {
    /// The palette contains no colors
    #[error("palette is empty")]
    EmptyPalette,

    /// The palette has more colors than a byte index can address
    #[error("palette has {len} colors, at most 256 are supported")]
    PaletteTooLarge { len: usize },

    /// The mean-value lookup table could not be built from the palette
    #[error("failed to initialize mean-value LUT: {0}")]
    MeanLut(String),

    /// Invalid image dimensions (width or height is zero, or the image size
    /// overflows `usize`)
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Row stride is smaller than the image width
    #[error("invalid stride: {stride} pixels for width {width}")]
    InvalidStride { width: usize, stride: usize },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Packed palette data is malformed
    #[error("invalid palette data: {0}")]
    InvalidPaletteData(String),
}

/// Result type for pixel mapping operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Size of one packed pixel or palette color in bytes.
pub const BYTES_PER_PIXEL: usize = 4;

/// Largest palette a byte-per-pixel index buffer can address.
pub const MAX_PALETTE_LEN: usize = 256;

/// Row alignment, in pixels, of padded pixel buffers.
pub const ROW_ALIGNMENT_PIXELS: usize = 32;
