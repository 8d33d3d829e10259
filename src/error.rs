//! Error taxonomy for symbol generation, rendering and batch archiving

use thiserror::Error;

use crate::encoder::modes::Mode;
use crate::models::ECLevel;
use crate::render::{ModuleStyle, OutputKind};

/// Errors returned by the generation pipeline
#[derive(Debug, Error)]
pub enum QrError {
    /// Payload does not fit the fixed version, or any version up to 40
    #[error(
        "payload of {length} characters does not fit {mode} mode at EC level {ec_level} (version {version})"
    )]
    CapacityExceeded {
        length: usize,
        mode: Mode,
        ec_level: ECLevel,
        /// The fixed version that was requested, or 40 when auto-selecting
        version: u8,
    },

    #[error("invalid version {0}: must be between 1 and 40")]
    InvalidVersion(u8),

    #[error("invalid error correction level {0:?}: expected one of L, M, Q, H")]
    InvalidEcLevel(String),

    #[error("module style {style} is not supported by {kind} output")]
    UnsupportedStyle { style: ModuleStyle, kind: OutputKind },

    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    #[error("invalid render settings: {0}")]
    InvalidRenderSpec(String),

    #[error("batch entry {index} failed: {cause}")]
    BatchEntryFailed {
        index: usize,
        #[source]
        cause: Box<QrError>,
    },

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QrError {
    /// The error behind a `BatchEntryFailed` wrapper, or `self`
    pub fn root_cause(&self) -> &QrError {
        match self {
            QrError::BatchEntryFailed { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_error_wraps_cause() {
        let err = QrError::BatchEntryFailed {
            index: 1,
            cause: Box::new(QrError::InvalidVersion(41)),
        };
        assert_eq!(
            err.to_string(),
            "batch entry 1 failed: invalid version 41: must be between 1 and 40"
        );
        assert!(matches!(err.root_cause(), QrError::InvalidVersion(41)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_capacity_message() {
        let err = QrError::CapacityExceeded {
            length: 42,
            mode: Mode::Numeric,
            ec_level: ECLevel::L,
            version: 1,
        };
        assert_eq!(
            err.to_string(),
            "payload of 42 characters does not fit numeric mode at EC level L (version 1)"
        );
    }
}
