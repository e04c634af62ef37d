//! Lookup tables precomputed once per palette.

use crate::color::Color;
use crate::{Error, Result};

/// Number of entries in [`SquaresLut`]. Covers differences of channel sums
/// (up to 765) as well as single channel differences.
pub const SQUARES_LEN: usize = 768;

/// `table[d] = d * d` for every difference the search can produce.
#[derive(Clone)]
pub struct SquaresLut(Box<[u32; SQUARES_LEN]>);

impl SquaresLut {
    pub fn new() -> Self {
        let mut table = Box::new([0u32; SQUARES_LEN]);
        for (d, sq) in table.iter_mut().enumerate() {
            *sq = (d * d) as u32;
        }
        Self(table)
    }

    #[inline(always)]
    pub fn get(&self, d: usize) -> u32 {
        self.0[d]
    }

    /// Squared difference of two channel values.
    #[inline(always)]
    pub fn channel(&self, a: u8, b: u8) -> u32 {
        self.0[a.abs_diff(b) as usize]
    }

    /// Squared difference of two channel sums.
    #[inline(always)]
    pub fn sum_gap(&self, a: u32, b: u32) -> u32 {
        self.0[a.abs_diff(b) as usize]
    }
}

impl Default for SquaresLut {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SquaresLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SquaresLut").field("len", &SQUARES_LEN).finish()
    }
}

/// Predicts a palette index from a pixel's mean channel value.
///
/// Built from the means of a palette sorted ascending by mean. Entry `j`
/// owns the values in `[(mean[j-1] + mean[j]) / 2, (mean[j] + mean[j+1]) / 2)`;
/// the first entry owns everything below its upper boundary and the last
/// entry everything from its lower boundary up to 255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeanIndexLut([u8; 256]);

impl MeanIndexLut {
    /// Builds the table from per-color means of a sorted palette.
    ///
    /// Returns [`Error::MeanLut`] when `means` is empty, longer than 256, not
    /// sorted, or the resulting table fails validation.
    pub fn build(means: &[u8]) -> Result<Self> {
        let n = means.len();
        if n == 0 {
            return Err(Error::MeanLut("no palette means".into()));
        }
        if n > 256 {
            return Err(Error::MeanLut(format!("{n} palette means")));
        }
        if let Some(k) = means.windows(2).position(|w| w[0] > w[1]) {
            return Err(Error::MeanLut(format!(
                "palette means not sorted at index {}: {} > {}",
                k,
                means[k],
                means[k + 1]
            )));
        }

        // Lower boundary of entry `j`'s bucket
        let lower = |j: usize| (means[j - 1] as usize + means[j] as usize) / 2;

        let mut table = [0u8; 256];
        let mut j = 0;
        for (v, slot) in table.iter_mut().enumerate() {
            while j + 1 < n && lower(j + 1) <= v {
                j += 1;
            }
            *slot = j as u8;
        }

        let lut = Self(table);
        lut.validate(n)?;
        Ok(lut)
    }

    fn validate(&self, palette_len: usize) -> Result<()> {
        if let Some(v) = self.0.iter().position(|&i| i as usize >= palette_len) {
            return Err(Error::MeanLut(format!(
                "value {} maps to index {} of a {}-color palette",
                v, self.0[v], palette_len
            )));
        }
        if let Some(v) = self.0.windows(2).position(|w| w[0] > w[1]) {
            return Err(Error::MeanLut(format!(
                "table decreases between values {} and {}",
                v,
                v + 1
            )));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn predict(&self, mean: u8) -> usize {
        self.0[mean as usize] as usize
    }

    pub fn as_slice(&self) -> &[u8; 256] {
        &self.0
    }
}

/// Symmetric matrix of squared distances between every pair of palette
/// colors, used for triangle-inequality elimination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteDistances {
    len: usize,
    table: Vec<u32>,
}

impl PaletteDistances {
    pub fn build(colors: &[Color], squares: &SquaresLut) -> Self {
        let len = colors.len();
        let mut table = vec![0u32; len * len];

        for i in 0..len {
            for j in (i + 1)..len {
                let (a, b) = (&colors[i], &colors[j]);
                let d = squares.channel(a.r, b.r) + squares.channel(a.g, b.g) + squares.channel(a.b, b.b);
                table[i * len + j] = d;
                table[j * len + i] = d;
            }
        }

        Self { len, table }
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        self.table[i * self.len + j]
    }

    /// Row of distances from palette entry `i` to every entry.
    #[inline(always)]
    pub fn row(&self, i: usize) -> &[u32] {
        &self.table[i * self.len..(i + 1) * self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
