//! Rendering of finished symbols
//!
//! Each [`OutputKind`] has one renderer; [`render_to`] dispatches on the kind
//! once and streams the result into any writer. Renderers never touch the
//! module grid, they only decide how it looks.

/// Terminal text output
pub mod ascii;
/// Raw module grid as JSON
pub mod matrix;
/// PNG raster output (colored and pure grayscale)
pub mod png;
/// SVG vector output
pub mod svg;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encoder::config;
use crate::error::QrError;
use crate::models::{BitMatrix, QRCode, Version};

pub use ascii::AsciiRenderer;
pub use matrix::MatrixRenderer;
pub use png::PngRenderer;
pub use svg::SvgRenderer;

/// Largest symbol-plus-quiet-zone side, in modules, any output kind accepts
pub const MAX_MODULES_PER_SIDE: usize = 2048;

/// Common contract of every output kind
pub trait Render {
    /// Write `qr` to `out` using `spec`
    fn render<W: Write>(qr: &QRCode, spec: &RenderSpec, out: &mut W) -> Result<(), QrError>;
}

/// 24-bit RGB color, written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for Color {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QrError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = QrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// What the renderer produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OutputKind {
    /// Colored PNG
    #[default]
    #[serde(rename = "PNG")]
    Raster,
    /// 8-bit grayscale PNG, always black on white
    #[serde(rename = "PURE_PNG")]
    PureRaster,
    /// SVG path
    #[serde(rename = "SVG")]
    Vector,
    /// Terminal text
    #[serde(rename = "ASCII")]
    Ascii,
    /// JSON grid of booleans
    #[serde(rename = "MATRIX")]
    RawMatrix,
}

impl OutputKind {
    pub const ALL: [OutputKind; 5] = [
        OutputKind::Raster,
        OutputKind::PureRaster,
        OutputKind::Vector,
        OutputKind::Ascii,
        OutputKind::RawMatrix,
    ];

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Raster | OutputKind::PureRaster => "png",
            OutputKind::Vector => "svg",
            OutputKind::Ascii => "txt",
            OutputKind::RawMatrix => "json",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            OutputKind::Raster | OutputKind::PureRaster => "image/png",
            OutputKind::Vector => "image/svg+xml",
            OutputKind::Ascii => "text/plain; charset=utf-8",
            OutputKind::RawMatrix => "application/json",
        }
    }

    /// Whether module shapes (and so [`ModuleStyle::Rounded`]) mean anything
    pub fn supports_style(self) -> bool {
        matches!(
            self,
            OutputKind::Raster | OutputKind::PureRaster | OutputKind::Vector
        )
    }

    fn name(self) -> &'static str {
        match self {
            OutputKind::Raster => "PNG",
            OutputKind::PureRaster => "PURE_PNG",
            OutputKind::Vector => "SVG",
            OutputKind::Ascii => "ASCII",
            OutputKind::RawMatrix => "MATRIX",
        }
    }
}

impl FromStr for OutputKind {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QrError::InvalidRenderSpec(format!("unknown output format {s:?}")))
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of each dark module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStyle {
    #[default]
    #[serde(alias = "square")]
    Standard,
    Rounded,
}

impl FromStr for ModuleStyle {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "square" => Ok(ModuleStyle::Standard),
            "rounded" => Ok(ModuleStyle::Rounded),
            _ => Err(QrError::InvalidRenderSpec(format!("unknown module style {s:?}"))),
        }
    }
}

impl fmt::Display for ModuleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStyle::Standard => f.write_str("standard"),
            ModuleStyle::Rounded => f.write_str("rounded"),
        }
    }
}

/// Character set for [`OutputKind::Ascii`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsciiCharset {
    /// Two characters per module, one text line per module row
    #[default]
    Blocks,
    /// One character per module, two module rows per text line
    HalfBlocks,
}

/// Render-time parameters. They never change the module grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSpec {
    /// Pixels per module (raster) or user units per module (vector)
    pub box_size: u32,
    /// Quiet zone width in modules
    pub border: u32,
    pub fill: Color,
    pub background: Color,
    pub kind: OutputKind,
    pub style: ModuleStyle,
    pub ascii: AsciiCharset,
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self {
            box_size: config::default_box_size(),
            border: config::default_border(),
            fill: Color::BLACK,
            background: Color::WHITE,
            kind: OutputKind::default(),
            style: ModuleStyle::default(),
            ascii: AsciiCharset::default(),
        }
    }
}

impl RenderSpec {
    pub fn with_kind(kind: OutputKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Reject combinations no renderer can honor
    pub fn validate(&self) -> Result<(), QrError> {
        if self.box_size == 0 {
            return Err(QrError::InvalidRenderSpec(
                "box size must be at least 1".to_string(),
            ));
        }
        // Even a version 1 symbol cannot fit a larger quiet zone
        if self.border as usize > (MAX_MODULES_PER_SIDE - Version::MIN.size()) / 2 {
            return Err(side_limit_error());
        }
        if self.style == ModuleStyle::Rounded && !self.kind.supports_style() {
            return Err(QrError::UnsupportedStyle {
                style: self.style,
                kind: self.kind,
            });
        }
        Ok(())
    }

    /// Side of the symbol plus quiet zone, in modules
    pub fn modules_with_border(&self, qr: &QRCode) -> usize {
        qr.size() + 2 * self.border as usize
    }

    /// [`RenderSpec::modules_with_border`], rejected above [`MAX_MODULES_PER_SIDE`]
    pub fn checked_side(&self, qr: &QRCode) -> Result<usize, QrError> {
        let side = self.modules_with_border(qr);
        if side > MAX_MODULES_PER_SIDE {
            return Err(side_limit_error());
        }
        Ok(side)
    }
}

fn side_limit_error() -> QrError {
    QrError::InvalidRenderSpec(format!(
        "output would exceed {MAX_MODULES_PER_SIDE} modules per side"
    ))
}

/// Render `qr` into `out` according to `spec`
pub fn render_to<W: Write>(qr: &QRCode, spec: &RenderSpec, out: &mut W) -> Result<(), QrError> {
    spec.validate()?;
    spec.checked_side(qr)?;
    match spec.kind {
        OutputKind::Raster | OutputKind::PureRaster => PngRenderer::render(qr, spec, out),
        OutputKind::Vector => SvgRenderer::render(qr, spec, out),
        OutputKind::Ascii => AsciiRenderer::render(qr, spec, out),
        OutputKind::RawMatrix => MatrixRenderer::render(qr, spec, out),
    }
}

/// Render `qr` into a fresh buffer
pub fn render(qr: &QRCode, spec: &RenderSpec) -> Result<Vec<u8>, QrError> {
    let mut out = Vec::new();
    render_to(qr, spec, &mut out)?;
    Ok(out)
}

/// Which corners of the dark module at (x, y) are rounded: top-left, top-right,
/// bottom-right, bottom-left. A corner is rounded when both modules touching it
/// along the edges are light.
pub(crate) fn rounded_corners(modules: &BitMatrix, x: usize, y: usize) -> [bool; 4] {
    let (x, y) = (x as isize, y as isize);
    let light = |dx: isize, dy: isize| !modules.get_signed(x + dx, y + dy);
    let (up, down, left, right) = (light(0, -1), light(0, 1), light(-1, 0), light(1, 0));
    [up && left, up && right, down && right, down && left]
}
