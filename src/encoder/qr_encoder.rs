/// Main QR code encoder - wires the pipeline together
use tracing::{debug, instrument};

use crate::encoder::bitstream::{Segment, encode_data_codewords};
use crate::encoder::mask::select_mask;
use crate::encoder::placement::build_matrix;
use crate::encoder::reed_solomon::add_ec_and_interleave;
use crate::encoder::version::select_version;
use crate::error::QrError;
use crate::models::{ECLevel, MaskPattern, QRCode, Version};

/// Main QR encoder that turns a payload into a finished symbol
pub struct QrEncoder;

impl QrEncoder {
    /// Encode `text` with the most compact mode, choosing version and mask automatically
    /// unless `version` is fixed
    pub fn encode(
        text: &str,
        ec_level: ECLevel,
        version: Option<Version>,
    ) -> Result<QRCode, QrError> {
        Self::encode_segment(&Segment::new(text), ec_level, version, None)
    }

    /// Like [`QrEncoder::encode`] with an optional fixed mask pattern
    pub fn encode_with_mask(
        text: &str,
        ec_level: ECLevel,
        version: Option<Version>,
        mask: Option<MaskPattern>,
    ) -> Result<QRCode, QrError> {
        Self::encode_segment(&Segment::new(text), ec_level, version, mask)
    }

    /// Encode raw bytes in byte mode regardless of content
    pub fn encode_bytes(
        data: &[u8],
        ec_level: ECLevel,
        version: Option<Version>,
    ) -> Result<QRCode, QrError> {
        Self::encode_segment(&Segment::bytes(data), ec_level, version, None)
    }

    #[instrument(
        level = "debug",
        skip_all,
        fields(mode = %segment.mode(), length = segment.char_count(), ec = %ec_level)
    )]
    pub fn encode_segment(
        segment: &Segment<'_>,
        ec_level: ECLevel,
        version: Option<Version>,
        mask: Option<MaskPattern>,
    ) -> Result<QRCode, QrError> {
        // Capacity is checked before anything touches the matrix
        let version = select_version(segment, ec_level, version)?;
        let data = encode_data_codewords(segment, version, ec_level)?;
        let codewords = add_ec_and_interleave(&data, version, ec_level);

        let (unmasked, function) = build_matrix(version, &codewords);
        let (modules, mask_pattern, penalty) = select_mask(&unmasked, &function, ec_level, mask);
        debug!(
            version = version.number(),
            mask = mask_pattern.id(),
            penalty,
            "symbol encoded"
        );

        Ok(QRCode::new(
            version,
            ec_level,
            mask_pattern,
            segment.mode(),
            modules,
        ))
    }
}
