use std::io::Write;

use super::{Render, RenderSpec};
use crate::error::QrError;
use crate::models::QRCode;

/// Raw module grid as a JSON array of rows, `true` = dark. No quiet zone, no colors.
pub struct MatrixRenderer;

impl Render for MatrixRenderer {
    fn render<W: Write>(qr: &QRCode, _spec: &RenderSpec, out: &mut W) -> Result<(), QrError> {
        serde_json::to_writer(&mut *out, &qr.to_rows())?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
