//! QR code encoding modules
//!
//! This module contains the symbol generation pipeline:
//! - Mode selection and bit packing (numeric, alphanumeric, byte)
//! - Version selection against the capacity tables
//! - Reed-Solomon error correction and block interleaving
//! - Module placement, masking and format/version information

/// Bit buffer and data codeword construction
pub mod bitstream;
pub mod config;
/// Format information (EC level + mask, BCH(15,5))
pub mod format;
/// Function module mask builder (finder/timing/format/alignment/version)
pub mod function_mask;
/// Mask application and penalty scoring
pub mod mask;
/// Data mode encoders (numeric, alphanumeric, byte)
pub mod modes;
/// Function pattern drawing and zigzag data placement
pub mod placement;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Standard lookup tables (capacities, ECC codewords/blocks)
pub mod tables;
/// Version selection and version information (versions 7-40)
pub mod version;

pub use qr_encoder::QrEncoder;
