use crate::encoder::bitstream::BitBuffer;

/// Byte mode encoder (Mode 0100) for 8-bit data
/// Text is packed as its UTF-8 bytes, 8 bits each, MSB first
pub struct ByteEncoder;

impl ByteEncoder {
    pub fn bit_length(count: usize) -> usize {
        count * 8
    }

    pub fn encode(data: &[u8], buffer: &mut BitBuffer) {
        for &byte in data {
            buffer.append_bits(u32::from(byte), 8);
        }
    }
}
