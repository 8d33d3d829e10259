//! qrgen - QR code generation engine
//!
//! Turns text into ISO/IEC 18004 (Model 2) QR symbols and renders them as PNG,
//! SVG, terminal text or a raw module grid, one at a time or as a ZIP batch.
//!
//! ```no_run
//! use qrgen::{ECLevel, OutputKind, RenderSpec};
//!
//! let spec = RenderSpec::with_kind(OutputKind::Vector);
//! let svg = qrgen::generate_symbol("https://example.com", ECLevel::M, None, &spec).unwrap();
//! assert!(svg.starts_with(b"<?xml"));
//! ```

/// Batch generation into ZIP archives
pub mod batch;
/// QR code encoding modules (modes, error correction, placement, masking)
pub mod encoder;
/// Error type shared by every stage
pub mod error;
/// Core data structures (QRCode, BitMatrix, Version, ...)
pub mod models;
/// Renderers for every output kind
pub mod render;

use std::io::{Seek, Write};

pub use batch::{BatchJob, SymbolJob, SymbolRequest};
pub use encoder::QrEncoder;
pub use encoder::modes::Mode;
pub use error::QrError;
pub use models::{BitMatrix, ECLevel, MaskPattern, QRCode, Version};
pub use render::{AsciiCharset, Color, ModuleStyle, OutputKind, RenderSpec};

/// Encode `payload` and render it according to `spec`
///
/// # Arguments
/// * `payload` - Text to encode; non-ASCII text is encoded as UTF-8 bytes
/// * `ec_level` - Error correction level
/// * `version` - Fixed version, or `None` for the smallest that fits
/// * `spec` - Output kind, sizes, colors and module style
pub fn generate_symbol(
    payload: &str,
    ec_level: ECLevel,
    version: Option<Version>,
    spec: &RenderSpec,
) -> Result<Vec<u8>, QrError> {
    let mut out = Vec::new();
    write_symbol(payload, ec_level, version, spec, &mut out)?;
    Ok(out)
}

/// Streaming form of [`generate_symbol`]
pub fn write_symbol<W: Write>(
    payload: &str,
    ec_level: ECLevel,
    version: Option<Version>,
    spec: &RenderSpec,
    out: &mut W,
) -> Result<(), QrError> {
    spec.validate()?;
    let qr = QrEncoder::encode(payload, ec_level, version)?;
    render::render_to(&qr, spec, out)
}

/// Encode `payload` and return the module grid, `true` = dark, no quiet zone
pub fn generate_matrix(
    payload: &str,
    ec_level: ECLevel,
    version: Option<Version>,
) -> Result<Vec<Vec<bool>>, QrError> {
    Ok(QrEncoder::encode(payload, ec_level, version)?.to_rows())
}

/// Generate every request and pack the results into a ZIP archive.
///
/// Fails with [`QrError::BatchEntryFailed`] for the lowest failing index; no
/// archive is produced in that case.
pub fn generate_batch(requests: &[SymbolRequest]) -> Result<Vec<u8>, QrError> {
    batch::archive_bytes(requests)
}

/// Streaming form of [`generate_batch`]
pub fn write_batch<W: Write + Seek>(requests: &[SymbolRequest], out: W) -> Result<W, QrError> {
    batch::write_archive(requests, out)
}
