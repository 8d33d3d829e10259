use std::io::Write;

use super::{AsciiCharset, Render, RenderSpec};
use crate::error::QrError;
use crate::models::QRCode;

/// Terminal rendering. Dark modules are drawn with block characters.
pub struct AsciiRenderer;

impl Render for AsciiRenderer {
    fn render<W: Write>(qr: &QRCode, spec: &RenderSpec, out: &mut W) -> Result<(), QrError> {
        out.write_all(to_ascii_string(qr, spec).as_bytes())?;
        Ok(())
    }
}

pub fn to_ascii_string(qr: &QRCode, spec: &RenderSpec) -> String {
    let border = spec.border as isize;
    let size = qr.size() as isize;
    let modules = qr.modules();
    let rows = -border..size + border;
    let mut result = String::new();

    match spec.ascii {
        AsciiCharset::Blocks => {
            for y in rows {
                for x in -border..size + border {
                    result.push_str(if modules.get_signed(x, y) { "██" } else { "  " });
                }
                result.push('\n');
            }
        }
        AsciiCharset::HalfBlocks => {
            for y in rows.step_by(2) {
                for x in -border..size + border {
                    let top = modules.get_signed(x, y);
                    let bottom = y + 1 < size + border && modules.get_signed(x, y + 1);
                    result.push(match (top, bottom) {
                        (false, false) => ' ',
                        (true, false) => '▀',
                        (false, true) => '▄',
                        (true, true) => '█',
                    });
                }
                result.push('\n');
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::QrEncoder;
    use crate::models::ECLevel;
    use crate::render::OutputKind;

    fn spec(border: u32, ascii: AsciiCharset) -> RenderSpec {
        RenderSpec {
            border,
            ascii,
            ..RenderSpec::with_kind(OutputKind::Ascii)
        }
    }

    #[test]
    fn test_blocks_two_chars_per_module() {
        let qr = QrEncoder::encode("ASCII", ECLevel::M, None).unwrap();
        let text = to_ascii_string(&qr, &spec(2, AsciiCharset::Blocks));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 25);
        assert!(lines.iter().all(|line| line.chars().count() == 50));
        // Quiet zone row, then the top edge of the finder pattern
        assert!(lines[0].chars().all(|c| c == ' '));
        assert!(lines[2].starts_with("    ██████████████  "));
    }

    #[test]
    fn test_half_blocks_pack_two_rows() {
        let qr = QrEncoder::encode("ASCII", ECLevel::M, None).unwrap();
        let text = to_ascii_string(&qr, &spec(1, AsciiCharset::HalfBlocks));
        let lines: Vec<&str> = text.lines().collect();
        // 23 module rows -> 12 text lines, the last one half empty
        assert_eq!(lines.len(), 12);
        assert!(lines.iter().all(|line| line.chars().count() == 23));
        // Row -1 is quiet zone, row 0 is the finder top edge
        assert!(lines[0].starts_with(" ▄▄▄▄▄▄▄ "));
    }

    #[test]
    fn test_every_dark_module_is_drawn() {
        let qr = QrEncoder::encode("count me", ECLevel::L, None).unwrap();
        let text = to_ascii_string(&qr, &spec(0, AsciiCharset::Blocks));
        let blocks = text.chars().filter(|&c| c == '█').count();
        assert_eq!(blocks, qr.modules().count_dark() * 2);
    }
}
