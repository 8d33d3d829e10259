//! QR data mode encoders
//!
//! This module contains the mode selector and the packers for each mode:
//! - Numeric: digits 0-9, three digits per 10 bits
//! - Alphanumeric: the 45-character QR set, two characters per 11 bits
//! - Byte: UTF-8 bytes, 8 bits each

pub mod alphanumeric;
pub mod byte;
pub mod numeric;

use std::fmt;

use crate::models::Version;

pub use alphanumeric::AlphanumericEncoder;
pub use byte::ByteEncoder;
pub use numeric::NumericEncoder;

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Decimal digits only
    Numeric,
    /// Digits, uppercase A-Z, space and `$%*+-./:`
    Alphanumeric,
    /// Raw UTF-8 bytes
    Byte,
}

impl Mode {
    /// All modes, most compact first
    pub const ALL: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];

    /// Pick the most compact mode that can represent `text`.
    ///
    /// Only ASCII characters count for numeric and alphanumeric; anything else
    /// is encoded as its UTF-8 bytes. The empty string is encoded as bytes.
    pub fn detect(text: &str) -> Mode {
        if text.is_empty() {
            Mode::Byte
        } else if text.bytes().all(NumericEncoder::is_encodable) {
            Mode::Numeric
        } else if text.bytes().all(AlphanumericEncoder::is_encodable) {
            Mode::Alphanumeric
        } else {
            Mode::Byte
        }
    }

    /// 4-bit mode indicator
    pub fn indicator(self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
        }
    }

    /// Width of the character-count indicator for a version
    pub fn char_count_bits(self, version: Version) -> usize {
        let column = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        let widths = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
        };
        widths[column]
    }

    /// Bits used by `count` characters of payload, without header
    pub fn payload_bit_length(self, count: usize) -> usize {
        match self {
            Mode::Numeric => NumericEncoder::bit_length(count),
            Mode::Alphanumeric => AlphanumericEncoder::bit_length(count),
            Mode::Byte => ByteEncoder::bit_length(count),
        }
    }

    /// Bits used by mode indicator, character count and payload
    pub fn encoded_bit_length(self, count: usize, version: Version) -> usize {
        4 + self.char_count_bits(version) + self.payload_bit_length(count)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Mode::Numeric => 0,
            Mode::Alphanumeric => 1,
            Mode::Byte => 2,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
        };
        f.write_str(name)
    }
}
