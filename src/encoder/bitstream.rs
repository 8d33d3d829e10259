/// Data codeword construction: mode indicator, character count, payload, terminator, padding
use crate::encoder::modes::{AlphanumericEncoder, ByteEncoder, Mode, NumericEncoder};
use crate::encoder::tables;
use crate::error::QrError;
use crate::models::{ECLevel, Version};

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Growable bit sequence, packed MSB first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    len: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append the low `width` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, width: usize) {
        debug_assert!(width <= 31 && value >> width == 0, "value wider than field");
        for i in (0..width).rev() {
            let bit = (value >> i) & 1;
            if self.len % 8 == 0 {
                self.data.push(0);
            }
            if bit == 1 {
                let last = self.data.len() - 1;
                self.data[last] |= 0x80 >> (self.len % 8);
            }
            self.len += 1;
        }
    }

    /// Bits as a string of '0'/'1', for inspection in tests and debug logs
    pub fn to_bit_string(&self) -> String {
        (0..self.len)
            .map(|i| {
                if (self.data[i / 8] >> (7 - i % 8)) & 1 == 1 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }

    /// Packed bytes; a trailing partial byte is zero-filled
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// The payload as it will be packed: one mode for the whole text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    mode: Mode,
    data: &'a [u8],
}

impl<'a> Segment<'a> {
    /// Select the mode for `text` and borrow its UTF-8 bytes
    pub fn new(text: &'a str) -> Self {
        Self {
            mode: Mode::detect(text),
            data: text.as_bytes(),
        }
    }

    /// Force byte mode regardless of content
    pub fn bytes(data: &'a [u8]) -> Self {
        Self {
            mode: Mode::Byte,
            data,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Characters for numeric/alphanumeric, bytes for byte mode
    pub fn char_count(&self) -> usize {
        self.data.len()
    }

    /// Header plus payload bits at a given version
    pub fn bit_length(&self, version: Version) -> usize {
        self.mode.encoded_bit_length(self.char_count(), version)
    }

    fn append_to(&self, version: Version, buffer: &mut BitBuffer) {
        buffer.append_bits(self.mode.indicator(), 4);
        buffer.append_bits(
            self.char_count() as u32,
            self.mode.char_count_bits(version),
        );
        match self.mode {
            Mode::Numeric => NumericEncoder::encode(self.data, buffer),
            Mode::Alphanumeric => AlphanumericEncoder::encode(self.data, buffer),
            Mode::Byte => ByteEncoder::encode(self.data, buffer),
        }
    }
}

/// Build the exact data codeword sequence for `segment` at `version`/`ec_level`
pub fn encode_data_codewords(
    segment: &Segment<'_>,
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>, QrError> {
    let data_codewords = tables::data_codewords(version, ec_level);
    let capacity_bits = data_codewords * 8;
    let used_bits = segment.bit_length(version);
    if used_bits > capacity_bits {
        return Err(QrError::CapacityExceeded {
            length: segment.char_count(),
            mode: segment.mode(),
            ec_level,
            version: version.number(),
        });
    }

    let mut buffer = BitBuffer::with_capacity(capacity_bits);
    segment.append_to(version, &mut buffer);
    debug_assert_eq!(buffer.len(), used_bits);

    // Terminator, then zero bits up to the byte boundary
    let terminator = (capacity_bits - buffer.len()).min(4);
    buffer.append_bits(0, terminator);
    let alignment = buffer.len().wrapping_neg() & 7;
    buffer.append_bits(0, alignment);

    let mut codewords = buffer.into_bytes();
    codewords.extend(PAD_BYTES.iter().cycle().take(data_codewords - codewords.len()));
    debug_assert_eq!(codewords.len(), data_codewords);
    Ok(codewords)
}
