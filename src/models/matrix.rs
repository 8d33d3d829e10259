/// Square grid of modules packed one bit per module (true = dark)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    size: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create an all-light matrix with `size` modules per side
    pub fn new(size: usize) -> Self {
        let bytes_needed = (size * size).div_ceil(8);
        Self {
            size,
            data: vec![0; bytes_needed],
        }
    }

    /// Modules per side
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get module at column `x`, row `y`. Out-of-range reads are light.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        let index = y * self.size + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Signed lookup used by renderers that walk the quiet zone
    pub fn get_signed(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    /// Set module at (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.size || y >= self.size {
            return;
        }
        let index = y * self.size + x;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Toggle module at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.size || y >= self.size {
            return;
        }
        let index = y * self.size + x;
        self.data[index / 8] ^= 1 << (index % 8);
    }

    /// Set every module in the `width` x `height` rectangle at (left, top)
    pub fn fill_rect(&mut self, left: usize, top: usize, width: usize, height: usize, value: bool) {
        for y in top..top + height {
            for x in left..left + width {
                self.set(x, y, value);
            }
        }
    }

    /// Number of dark modules
    pub fn count_dark(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Rows of booleans, top to bottom
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.size)
            .map(|y| (0..self.size).map(|x| self.get(x, y)).collect())
            .collect()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0)
    }
}
