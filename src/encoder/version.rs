/// Version selection and version information for QR codes
use tracing::debug;

use crate::encoder::bitstream::Segment;
use crate::encoder::tables;
use crate::error::QrError;
use crate::models::{BitMatrix, ECLevel, Version};

/// BCH(18,6) generator polynomial x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;

/// Pick the smallest version that holds `segment`, or validate a fixed one
pub fn select_version(
    segment: &Segment<'_>,
    ec_level: ECLevel,
    requested: Option<Version>,
) -> Result<Version, QrError> {
    let fits = |version: Version| {
        segment.char_count() <= tables::max_characters(version, ec_level, segment.mode())
    };

    let chosen = match requested {
        Some(version) => fits(version).then_some(version),
        None => Version::all().find(|&version| fits(version)),
    };

    match chosen {
        Some(version) => {
            debug_assert!(
                segment.bit_length(version) <= tables::data_codewords(version, ec_level) * 8
            );
            debug!(
                version = version.number(),
                fixed = requested.is_some(),
                mode = %segment.mode(),
                "version selected"
            );
            Ok(version)
        }
        None => Err(QrError::CapacityExceeded {
            length: segment.char_count(),
            mode: segment.mode(),
            ec_level,
            version: requested.unwrap_or(Version::MAX).number(),
        }),
    }
}

/// Version info is 18 bits (6 data + 12 ECC) for versions 7-40
pub struct VersionInfo;

impl VersionInfo {
    /// 18-bit codeword for `version`, version number in the top 6 bits
    pub fn bits(version: Version) -> u32 {
        let data = u32::from(version.number());
        let mut rem = data;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
        }
        (data << 12) | rem
    }

    /// Write both 6x3 version blocks; no-op below version 7
    pub fn draw(version: Version, matrix: &mut BitMatrix) {
        if !version.has_version_info() {
            return;
        }
        let size = matrix.size();
        let bits = Self::bits(version);
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            let a = size - 11 + i % 3;
            let b = i / 3;
            // Top-right block, then its transpose at bottom-left
            matrix.set(a, b, dark);
            matrix.set(b, a, dark);
        }
    }
}
