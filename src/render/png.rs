use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{ColorType, GrayImage, ImageEncoder, Luma, Rgb, RgbImage};

use super::{Color, ModuleStyle, OutputKind, Render, RenderSpec, rounded_corners};
use crate::error::QrError;
use crate::models::QRCode;

/// Largest image side we agree to allocate, in pixels
const MAX_IMAGE_SIDE: u32 = 32_768;

/// PNG output. [`OutputKind::PureRaster`] writes 8-bit grayscale and ignores the colors.
pub struct PngRenderer;

impl Render for PngRenderer {
    fn render<W: Write>(qr: &QRCode, spec: &RenderSpec, out: &mut W) -> Result<(), QrError> {
        let side = image_side(qr, spec)?;
        let encoder = PngEncoder::new(out);

        if spec.kind == OutputKind::PureRaster {
            let mut img = GrayImage::from_pixel(side, side, Luma([255]));
            paint_dark_pixels(qr, spec, |x, y| img.put_pixel(x, y, Luma([0])));
            encoder.write_image(img.as_raw(), side, side, ColorType::L8)?;
        } else {
            let mut img = RgbImage::from_pixel(side, side, rgb(spec.background));
            let fill = rgb(spec.fill);
            paint_dark_pixels(qr, spec, |x, y| img.put_pixel(x, y, fill));
            encoder.write_image(img.as_raw(), side, side, ColorType::Rgb8)?;
        }
        Ok(())
    }
}

fn rgb(color: Color) -> Rgb<u8> {
    Rgb(color.to_array())
}

/// Image side in pixels, symbol plus quiet zone
pub fn image_side(qr: &QRCode, spec: &RenderSpec) -> Result<u32, QrError> {
    u32::try_from(spec.modules_with_border(qr))
        .ok()
        .and_then(|modules| modules.checked_mul(spec.box_size))
        .filter(|&side| side <= MAX_IMAGE_SIDE)
        .ok_or_else(|| {
            QrError::InvalidRenderSpec(format!(
                "image would exceed {MAX_IMAGE_SIDE} pixels per side"
            ))
        })
}

/// Call `put` for every pixel covered by a dark module
fn paint_dark_pixels(qr: &QRCode, spec: &RenderSpec, mut put: impl FnMut(u32, u32)) {
    let box_size = spec.box_size;
    let radius = box_size as f32 / 2.0;
    let modules = qr.modules();

    for y in 0..qr.size() {
        for x in 0..qr.size() {
            if !modules.get(x, y) {
                continue;
            }
            let corners = match spec.style {
                ModuleStyle::Standard => [false; 4],
                ModuleStyle::Rounded => rounded_corners(modules, x, y),
            };
            let left = (x as u32 + spec.border) * box_size;
            let top = (y as u32 + spec.border) * box_size;

            for v in 0..box_size {
                for u in 0..box_size {
                    if corners.iter().any(|&c| c) && outside_corner(u, v, radius, &corners) {
                        continue;
                    }
                    put(left + u, top + v);
                }
            }
        }
    }
}

/// Whether local pixel (u, v) falls outside the quarter circle of a rounded corner
fn outside_corner(u: u32, v: u32, radius: f32, corners: &[bool; 4]) -> bool {
    let cx = u as f32 + 0.5;
    let cy = v as f32 + 0.5;
    let corner = match (cx < radius, cy < radius) {
        (true, true) => 0,
        (false, true) => 1,
        (false, false) => 2,
        (true, false) => 3,
    };
    if !corners[corner] {
        return false;
    }
    let dx = cx - radius;
    let dy = cy - radius;
    dx * dx + dy * dy > radius * radius
}
