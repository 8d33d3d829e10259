//! Batch generation into a ZIP archive
//!
//! Entries are generated in parallel and written by a single writer in input
//! order as `qrcode_<index>.<ext>`. The first failing entry (lowest index)
//! aborts the batch before anything is written.

use std::io::{Cursor, Seek, Write};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::encoder::QrEncoder;
use crate::encoder::config;
use crate::error::QrError;
use crate::models::{ECLevel, Version};
use crate::render::{self, AsciiCharset, Color, ModuleStyle, OutputKind, RenderSpec};

/// Everything needed to produce one rendered symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRequest {
    pub payload: String,
    pub ec_level: ECLevel,
    /// `None` selects the smallest version that fits
    pub version: Option<Version>,
    pub render: RenderSpec,
}

impl SymbolRequest {
    /// Request with the configured defaults: auto version, default EC level, PNG
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            ec_level: ECLevel::default(),
            version: None,
            render: RenderSpec::default(),
        }
    }

    /// Run the full pipeline and return the rendered bytes
    pub fn generate(&self) -> Result<Vec<u8>, QrError> {
        // Style problems surface before any encoding work
        self.render.validate()?;
        let qr = QrEncoder::encode(&self.payload, self.ec_level, self.version)?;
        render::render(&qr, &self.render)
    }
}

/// One item of a JSON job file. Field names and defaults follow the HTTP request model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolJob {
    pub data: String,
    pub error_correction: Option<String>,
    /// 0 = auto
    pub version: u8,
    pub box_size: Option<u32>,
    pub border: Option<u32>,
    pub fill_color: Color,
    pub back_color: Color,
    pub format: OutputKind,
    pub style: ModuleStyle,
    pub ascii: AsciiCharset,
}

impl Default for SymbolJob {
    fn default() -> Self {
        Self {
            data: String::new(),
            error_correction: None,
            version: 0,
            box_size: None,
            border: None,
            fill_color: Color::BLACK,
            back_color: Color::WHITE,
            format: OutputKind::default(),
            style: ModuleStyle::default(),
            ascii: AsciiCharset::default(),
        }
    }
}

impl TryFrom<SymbolJob> for SymbolRequest {
    type Error = QrError;

    fn try_from(job: SymbolJob) -> Result<Self, Self::Error> {
        let ec_level = match job.error_correction.as_deref() {
            Some(level) => level.parse::<ECLevel>()?,
            None => ECLevel::default(),
        };
        Ok(Self {
            payload: job.data,
            ec_level,
            version: Version::from_request(job.version)?,
            render: RenderSpec {
                box_size: job.box_size.unwrap_or_else(config::default_box_size),
                border: job.border.unwrap_or_else(config::default_border),
                fill: job.fill_color,
                background: job.back_color,
                kind: job.format,
                style: job.style,
                ascii: job.ascii,
            },
        })
    }
}

/// A JSON job file: `{"items": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJob {
    pub items: Vec<SymbolJob>,
}

impl BatchJob {
    pub fn from_json(json: &str) -> Result<Self, QrError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert every item, wrapping conversion errors with the item index
    pub fn into_requests(self) -> Result<Vec<SymbolRequest>, QrError> {
        self.items
            .into_iter()
            .enumerate()
            .map(|(index, job)| {
                SymbolRequest::try_from(job).map_err(|cause| QrError::BatchEntryFailed {
                    index,
                    cause: Box::new(cause),
                })
            })
            .collect()
    }
}

/// Archive entry name for the item at `index`
pub fn entry_name(index: usize, kind: OutputKind) -> String {
    format!("qrcode_{index}.{}", kind.extension())
}

/// Generate every entry concurrently. Returns the outputs in input order, or the
/// error of the lowest failing index.
pub fn generate_all(requests: &[SymbolRequest]) -> Result<Vec<Vec<u8>>, QrError> {
    let results = with_worker_pool(|| {
        requests
            .par_iter()
            .map(SymbolRequest::generate)
            .collect::<Vec<_>>()
    });

    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            result.map_err(|cause| {
                debug!(index, error = %cause, "batch entry failed");
                QrError::BatchEntryFailed {
                    index,
                    cause: Box::new(cause),
                }
            })
        })
        .collect()
}

/// Generate all entries and write them as a deflated ZIP archive into `out`
#[instrument(level = "debug", skip_all, fields(entries = requests.len()))]
pub fn write_archive<W: Write + Seek>(requests: &[SymbolRequest], out: W) -> Result<W, QrError> {
    let outputs = generate_all(requests)?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = zip::ZipWriter::new(out);
    for (index, (request, bytes)) in requests.iter().zip(&outputs).enumerate() {
        zip.start_file(entry_name(index, request.render.kind), options)?;
        zip.write_all(bytes)?;
    }
    let out = zip.finish()?;
    debug!(entries = outputs.len(), "archive written");
    Ok(out)
}

/// [`write_archive`] into a fresh buffer
pub fn archive_bytes(requests: &[SymbolRequest]) -> Result<Vec<u8>, QrError> {
    Ok(write_archive(requests, Cursor::new(Vec::new()))?.into_inner())
}

/// Run `op` on a dedicated pool when `QR_BATCH_WORKERS` is set, else on the global pool
fn with_worker_pool<T: Send>(op: impl FnOnce() -> T + Send) -> T {
    let workers = config::batch_workers();
    if workers == 0 {
        return op();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(op),
        Err(err) => {
            warn!(workers, error = %err, "could not build batch pool, using global pool");
            op()
        }
    }
}
