use crate::encoder::bitstream::BitBuffer;

/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
pub struct NumericEncoder;

impl NumericEncoder {
    pub fn is_encodable(byte: u8) -> bool {
        byte.is_ascii_digit()
    }

    pub fn bit_length(count: usize) -> usize {
        (count / 3) * 10
            + match count % 3 {
                0 => 0,
                1 => 4,
                _ => 7,
            }
    }

    /// Append the packed digits of `data`. Every byte must be an ASCII digit.
    pub fn encode(data: &[u8], buffer: &mut BitBuffer) {
        for group in data.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &digit| acc * 10 + u32::from(digit - b'0'));
            let width = match group.len() {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            buffer.append_bits(value, width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_encode() {
        // "01234567" -> 012 | 345 | 67 = 0000001100 0101011001 1000011
        let mut buffer = BitBuffer::new();
        NumericEncoder::encode(b"01234567", &mut buffer);
        assert_eq!(buffer.len(), 27);
        assert_eq!(buffer.to_bit_string(), "000000110001010110011000011");
    }

    #[test]
    fn test_numeric_remainder_widths() {
        assert_eq!(NumericEncoder::bit_length(1), 4);
        assert_eq!(NumericEncoder::bit_length(2), 7);
        assert_eq!(NumericEncoder::bit_length(3), 10);
        assert_eq!(NumericEncoder::bit_length(41), 137);

        let mut buffer = BitBuffer::new();
        NumericEncoder::encode(b"9", &mut buffer);
        assert_eq!(buffer.to_bit_string(), "1001");
    }
}
