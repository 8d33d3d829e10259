use crate::encoder::bitstream::BitBuffer;

/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
const ALPHANUMERIC_TABLE: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Pairs = 11 bits (45 * first + second), single trailing character = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Position of `byte` in the 45-symbol table
    pub fn value_of(byte: u8) -> Option<u32> {
        ALPHANUMERIC_TABLE
            .iter()
            .position(|&c| c == byte)
            .map(|p| p as u32)
    }

    pub fn is_encodable(byte: u8) -> bool {
        Self::value_of(byte).is_some()
    }

    pub fn bit_length(count: usize) -> usize {
        (count / 2) * 11 + (count % 2) * 6
    }

    /// Append the packed characters of `data`. Every byte must be in the table.
    pub fn encode(data: &[u8], buffer: &mut BitBuffer) {
        for pair in data.chunks(2) {
            let values: Vec<u32> = pair.iter().filter_map(|&c| Self::value_of(c)).collect();
            debug_assert_eq!(values.len(), pair.len(), "non-alphanumeric input");
            match values.as_slice() {
                [first, second] => buffer.append_bits(first * 45 + second, 11),
                [single] => buffer.append_bits(*single, 6),
                _ => {}
            }
        }
    }
}
