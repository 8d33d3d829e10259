use std::io::Write;

use super::{ModuleStyle, Render, RenderSpec, rounded_corners};
use crate::error::QrError;
use crate::models::QRCode;

/// SVG output: one background rect and a single path in module units.
///
/// The `viewBox` is measured in modules; `width`/`height` scale it by the box size.
pub struct SvgRenderer;

impl Render for SvgRenderer {
    fn render<W: Write>(qr: &QRCode, spec: &RenderSpec, out: &mut W) -> Result<(), QrError> {
        out.write_all(to_svg_string(qr, spec).as_bytes())?;
        Ok(())
    }
}

/// The full SVG document as a string, Unix newlines
pub fn to_svg_string(qr: &QRCode, spec: &RenderSpec) -> String {
    let dimension = spec.modules_with_border(qr);
    let pixels = dimension as u64 * u64::from(spec.box_size);
    let border = spec.border as usize;
    let modules = qr.modules();

    let mut outlines = Vec::with_capacity(modules.count_dark());
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if !modules.get(x, y) {
                continue;
            }
            outlines.push(match spec.style {
                ModuleStyle::Standard => format!("M{},{}h1v1h-1z", x + border, y + border),
                ModuleStyle::Rounded => {
                    rounded_module(x + border, y + border, rounded_corners(modules, x, y))
                }
            });
        }
    }
    let path = outlines.join(" ");

    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{pixels}\" height=\"{pixels}\" viewBox=\"0 0 {dimension} {dimension}\" stroke=\"none\">\n",
            "\t<rect width=\"100%\" height=\"100%\" fill=\"{background}\"/>\n",
            "\t<path d=\"{path}\" fill=\"{fill}\"/>\n",
            "</svg>\n",
        ),
        pixels = pixels,
        dimension = dimension,
        background = spec.background,
        path = path,
        fill = spec.fill,
    )
}

/// Outline of one module with quarter-circle arcs on the rounded corners,
/// clockwise from the top edge
fn rounded_module(x: usize, y: usize, corners: [bool; 4]) -> String {
    let [tl, tr, br, bl] = corners;
    let (x, y) = (x as f64, y as f64);
    let r = 0.5;
    let inset = |rounded: bool| if rounded { r } else { 0.0 };
    let arc = |rounded: bool, ex: f64, ey: f64| {
        if rounded {
            format!("A{r},{r} 0 0 1 {ex},{ey}")
        } else {
            String::new()
        }
    };

    [
        format!("M{},{}", x + inset(tl), y),
        format!("H{}", x + 1.0 - inset(tr)),
        arc(tr, x + 1.0, y + r),
        format!("V{}", y + 1.0 - inset(br)),
        arc(br, x + 1.0 - r, y + 1.0),
        format!("H{}", x + inset(bl)),
        arc(bl, x, y + 1.0 - r),
        format!("V{}", y + inset(tl)),
        arc(tl, x + r, y),
        "z".to_string(),
    ]
    .concat()
}
