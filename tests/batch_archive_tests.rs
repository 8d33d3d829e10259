//! Archive and raster output read back with the zip and image crates

use std::io::{Cursor, Read};

use image::GenericImageView;
use qrgen::{
    AsciiCharset, Color, ECLevel, ModuleStyle, OutputKind, QrEncoder, RenderSpec, SymbolRequest,
};
use zip::{CompressionMethod, ZipArchive};

fn request(payload: &str, kind: OutputKind) -> SymbolRequest {
    SymbolRequest {
        render: RenderSpec::with_kind(kind),
        ..SymbolRequest::new(payload)
    }
}

#[test]
fn test_archive_entries_in_order_with_extensions() {
    let requests = vec![
        request("png entry", OutputKind::Raster),
        request("svg entry", OutputKind::Vector),
        request("pure entry", OutputKind::PureRaster),
        request("text entry", OutputKind::Ascii),
        request("grid entry", OutputKind::RawMatrix),
    ];
    let bytes = qrgen::generate_batch(&requests).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "qrcode_0.png",
            "qrcode_1.svg",
            "qrcode_2.png",
            "qrcode_3.txt",
            "qrcode_4.json",
        ]
    );

    for (i, request) in requests.iter().enumerate() {
        let mut entry = archive.by_index(i).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, request.generate().unwrap(), "entry {}", i);
    }
}

#[test]
fn test_duplicate_payloads_get_distinct_entries() {
    let requests = vec![request("same", OutputKind::Vector); 3];
    let bytes = qrgen::generate_batch(&requests).unwrap();
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 3);
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["qrcode_0.svg", "qrcode_1.svg", "qrcode_2.svg"]);
}

#[test]
fn test_empty_batch_is_an_empty_archive() {
    let bytes = qrgen::generate_batch(&[]).unwrap();
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 0);
}

#[test]
fn test_png_pixels_follow_modules_and_colors() {
    let fill = Color::rgb(0x20, 0x40, 0x80);
    let background = Color::rgb(0xF0, 0xF0, 0xE0);
    let spec = RenderSpec {
        box_size: 4,
        border: 2,
        fill,
        background,
        ..RenderSpec::with_kind(OutputKind::Raster)
    };
    let qr = QrEncoder::encode("pixels", ECLevel::M, None).unwrap();
    let bytes = qrgen::render::render(&qr, &spec).unwrap();

    let img = image::load_from_memory(&bytes).unwrap();
    let side = (qr.size() as u32 + 4) * 4;
    assert_eq!(img.dimensions(), (side, side));

    let rgb = img.to_rgb8();
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            // Centre pixel of each module
            let px = (x as u32 + 2) * 4 + 2;
            let py = (y as u32 + 2) * 4 + 2;
            let expected = if qr.is_dark(x, y) { fill } else { background };
            assert_eq!(rgb.get_pixel(px, py).0, expected.to_array(), "module ({x}, {y})");
        }
    }
    // Quiet zone corner
    assert_eq!(rgb.get_pixel(0, 0).0, background.to_array());
}

#[test]
fn test_pure_png_ignores_colors() {
    let spec = RenderSpec {
        box_size: 1,
        border: 0,
        fill: Color::rgb(255, 0, 0),
        background: Color::rgb(0, 0, 255),
        ..RenderSpec::with_kind(OutputKind::PureRaster)
    };
    let qr = QrEncoder::encode("pure", ECLevel::L, None).unwrap();
    let bytes = qrgen::render::render(&qr, &spec).unwrap();
    let gray = image::load_from_memory(&bytes).unwrap().to_luma8();
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            let expected = if qr.is_dark(x, y) { 0 } else { 255 };
            assert_eq!(gray.get_pixel(x as u32, y as u32).0, [expected]);
        }
    }
}

#[test]
fn test_rounded_png_keeps_module_centres() {
    let spec = RenderSpec {
        box_size: 9,
        border: 1,
        style: ModuleStyle::Rounded,
        ..RenderSpec::with_kind(OutputKind::Raster)
    };
    let qr = QrEncoder::encode("rounded", ECLevel::H, None).unwrap();
    let bytes = qrgen::render::render(&qr, &spec).unwrap();
    let rgb = image::load_from_memory(&bytes).unwrap().to_rgb8();
    for y in 0..qr.size() {
        for x in 0..qr.size() {
            let px = (x as u32 + 1) * 9 + 4;
            let py = (y as u32 + 1) * 9 + 4;
            let dark = rgb.get_pixel(px, py).0 == Color::BLACK.to_array();
            assert_eq!(dark, qr.is_dark(x, y));
        }
    }
}

#[test]
fn test_ascii_outputs_describe_same_grid() {
    let qr = QrEncoder::encode("ascii grid", ECLevel::Q, None).unwrap();
    let spec = RenderSpec {
        border: 0,
        ascii: AsciiCharset::Blocks,
        ..RenderSpec::with_kind(OutputKind::Ascii)
    };
    let text = String::from_utf8(qrgen::render::render(&qr, &spec).unwrap()).unwrap();
    for (y, line) in text.lines().enumerate() {
        let cells: Vec<char> = line.chars().step_by(2).collect();
        for (x, c) in cells.into_iter().enumerate() {
            assert_eq!(c == '█', qr.is_dark(x, y));
        }
    }
}
