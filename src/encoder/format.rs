/// Format information for QR codes
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// BCH(15,5) generator polynomial x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
/// XOR mask applied so the format bits are never all zero
const FORMAT_MASK: u16 = 0x5412;

/// Format info is 15 bits (5 data + 10 ECC)
/// Located at fixed positions around the finder patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// Masked 15-bit codeword, bit 14 first in reading order
    pub fn bits(&self) -> u16 {
        let data = (u32::from(self.ec_level.format_bits()) << 3) | u32::from(self.mask_pattern.id());
        let mut rem = data;
        for _ in 0..10 {
            rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
        }
        let bits = ((data << 10) | rem) as u16;
        debug_assert_eq!(bits >> 15, 0);
        bits ^ FORMAT_MASK
    }

    /// Write both copies of the format bits plus the dark module
    pub fn draw(&self, matrix: &mut BitMatrix) {
        let size = matrix.size();
        let bits = self.bits();
        let bit = |i: usize| (bits >> i) & 1 == 1;

        // First copy, around the top-left finder
        for i in 0..6 {
            matrix.set(8, i, bit(i));
        }
        matrix.set(8, 7, bit(6));
        matrix.set(8, 8, bit(7));
        matrix.set(7, 8, bit(8));
        for i in 9..15 {
            matrix.set(14 - i, 8, bit(i));
        }

        // Second copy, split between the top-right and bottom-left finders
        for i in 0..8 {
            matrix.set(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            matrix.set(8, size - 15 + i, bit(i));
        }

        matrix.set(8, size - 8, true);
    }
}
