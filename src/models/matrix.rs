use crate::error::{QrError, Result};

/// Compact bit matrix: the bi-level image fed to the detector and the
/// sampled module grid handed to the decoder (true = black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new all-white bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Create a square matrix
    pub fn square(dimension: usize) -> Self {
        Self::new(dimension, dimension)
    }

    /// Fill a matrix from a per-pixel predicate, e.g. a thresholding closure.
    pub fn from_fn(width: usize, height: usize, mut is_black: impl FnMut(usize, usize) -> bool) -> Self {
        let mut matrix = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if is_black(x, y) {
                    matrix.set(x, y, true);
                }
            }
        }
        matrix
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn bit_index(&self, x: usize, y: usize) -> (usize, u8) {
        let index = y * self.width + x;
        (index / 8, 1 << (index % 8))
    }

    /// Get bit at (x, y); positions outside the matrix read as white
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (byte, mask) = self.bit_index(x, y);
        self.data[byte] & mask != 0
    }

    /// Get bit at signed (x, y), failing with `OutOfBounds` outside the matrix
    pub fn try_get(&self, x: i64, y: i64) -> Result<bool> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Err(QrError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.get(x as usize, y as usize))
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (byte, mask) = self.bit_index(x, y);
        if value {
            self.data[byte] |= mask;
        } else {
            self.data[byte] &= !mask;
        }
    }

    /// Flip bit at (x, y)
    pub fn flip(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (byte, mask) = self.bit_index(x, y);
        self.data[byte] ^= mask;
    }

    /// Set every bit of the `width` x `height` rectangle at (left, top)
    pub fn set_region(&mut self, left: usize, top: usize, width: usize, height: usize) {
        let right = (left + width).min(self.width);
        let bottom = (top + height).min(self.height);
        for y in top..bottom {
            for x in left..right {
                self.set(x, y, true);
            }
        }
    }

    /// Swap (x, y) with (y, x) in place; no-op for non-square matrices
    pub fn transpose(&mut self) {
        if self.width != self.height {
            return;
        }
        for y in 0..self.height {
            for x in (y + 1)..self.width {
                let a = self.get(x, y);
                let b = self.get(y, x);
                if a != b {
                    self.flip(x, y);
                    self.flip(y, x);
                }
            }
        }
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
