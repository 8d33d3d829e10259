use std::fmt;
use std::str::FromStr;

use super::BitMatrix;
use crate::encoder::config;
use crate::encoder::modes::Mode;
use crate::error::QrError;

/// QR code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest symbol, 21x21 modules
    pub const MIN: Version = Version(1);
    /// Largest symbol, 177x177 modules
    pub const MAX: Version = Version(40);

    /// Create a version, failing with `InvalidVersion` outside 1-40
    pub fn new(number: u8) -> Result<Self, QrError> {
        if (1..=40).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QrError::InvalidVersion(number))
        }
    }

    /// Interpret a caller-supplied version where 0 means "pick automatically"
    pub fn from_request(number: u8) -> Result<Option<Self>, QrError> {
        match number {
            0 => Ok(None),
            n => Self::new(n).map(Some),
        }
    }

    /// Get the version number (1-40)
    pub fn number(self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Versions 7 and above carry an 18-bit version information block
    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }

    /// All versions in increasing order
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level, ordered by recovery capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels from lowest to highest recovery capacity
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two-bit value written into the format information (01=L, 00=M, 11=Q, 10=H)
    pub fn format_bits(self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl Default for ECLevel {
    fn default() -> Self {
        config::default_ec_level()
    }
}

impl FromStr for ECLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" => Ok(ECLevel::L),
            "M" | "m" => Ok(ECLevel::M),
            "Q" | "q" => Ok(ECLevel::Q),
            "H" | "h" => Ok(ECLevel::H),
            other => Err(QrError::InvalidEcLevel(other.to_string())),
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        };
        f.write_str(name)
    }
}

/// Mask pattern (0-7). `i` is the row, `j` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// Every pattern in mask-id order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its id (0-7)
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// Mask id (0-7)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Check if module at row `i`, column `j` is inverted by this mask
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// A finished QR symbol: the module grid plus the parameters it was built with.
///
/// This is the only value handed from the encoder to the renderers. It is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRCode {
    version: Version,
    error_correction: ECLevel,
    mask_pattern: MaskPattern,
    mode: Mode,
    modules: BitMatrix,
}

impl QRCode {
    pub(crate) fn new(
        version: Version,
        error_correction: ECLevel,
        mask_pattern: MaskPattern,
        mode: Mode,
        modules: BitMatrix,
    ) -> Self {
        debug_assert_eq!(modules.size(), version.size());
        Self {
            version,
            error_correction,
            mask_pattern,
            mode,
            modules,
        }
    }

    /// QR code version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn error_correction(&self) -> ECLevel {
        self.error_correction
    }

    /// Mask pattern committed for this symbol
    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask_pattern
    }

    /// Encoding mode of the payload
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Modules per side (4 * version + 17)
    pub fn size(&self) -> usize {
        self.modules.size()
    }

    /// True if the module at column `x`, row `y` is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Module matrix (true = dark)
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Dark/light grid as rows of booleans
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.modules.to_rows()
    }
}
