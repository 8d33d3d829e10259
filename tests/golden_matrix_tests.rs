//! Golden-matrix regression tests
//!
//! The reference symbol was produced by the Python `qrcode` library, which
//! picked mask 7 for it. Forcing the same mask must reproduce it module for
//! module.

use qrgen::encoder::format::FormatInfo;
use qrgen::encoder::mask::penalty_score;
use qrgen::encoder::version::VersionInfo;
use qrgen::{ECLevel, MaskPattern, Mode, QrEncoder, Version};

// Known-good 21x21 QR matrix for "4376471154038" (Version 1-M, mask 7)
const GOLDEN_4376471154038: [&str; 21] = [
    "#######.....#.#######",
    "#.....#..#....#.....#",
    "#.###.#...##..#.###.#",
    "#.###.#...#...#.###.#",
    "#.###.#..####.#.###.#",
    "#.....#.#.#...#.....#",
    "#######.#.#.#.#######",
    ".........#...........",
    "#..#.##.######.#.....",
    "###.#..##..#.#.#.##..",
    "#..#.####.##..###...#",
    "..#.#..#....#####....",
    "..#...##.#.#.###.##..",
    "........#.#..####.##.",
    "#######...###.#.####.",
    "#.....#.#.....##....#",
    "#.###.#..##.###..#.##",
    "#.###.#.#.#..####..##",
    "#.###.#..###.###.#..#",
    "#.....#..####..##..#.",
    "#######.###..#.###...",
];

fn golden_rows() -> Vec<Vec<bool>> {
    GOLDEN_4376471154038
        .iter()
        .map(|row| row.chars().map(|c| c == '#').collect())
        .collect()
}

#[test]
fn test_golden_matrix_with_forced_mask() {
    let qr = QrEncoder::encode_with_mask(
        "4376471154038",
        ECLevel::M,
        None,
        Some(MaskPattern::Pattern7),
    )
    .expect("encode golden payload");

    assert_eq!(qr.version(), Version::MIN);
    assert_eq!(qr.mode(), Mode::Numeric);

    let expected = golden_rows();
    let actual = qr.to_rows();
    for (y, (want, got)) in expected.iter().zip(&actual).enumerate() {
        assert_eq!(want, got, "row {} differs", y);
    }
}

#[test]
fn test_golden_format_bits() {
    let rows = golden_rows();
    // Format copy next to the top-right finder holds bits 0..7
    let mut low = 0u16;
    for i in (0..8).rev() {
        low = (low << 1) | rows[8][20 - i] as u16;
    }
    let bits = FormatInfo::new(ECLevel::M, MaskPattern::Pattern7).bits();
    assert_eq!(low, bits & 0xFF);
}

#[test]
fn test_auto_mask_is_penalty_minimum() {
    let auto = QrEncoder::encode("4376471154038", ECLevel::M, None).unwrap();
    let auto_score = penalty_score(auto.modules());

    for mask in MaskPattern::ALL {
        let forced =
            QrEncoder::encode_with_mask("4376471154038", ECLevel::M, None, Some(mask)).unwrap();
        let score = penalty_score(forced.modules());
        assert!(auto_score <= score, "mask {} scores {}", mask.id(), score);
        if score == auto_score {
            assert!(auto.mask_pattern().id() <= mask.id());
        }
    }
    // Mask 3 scores lowest for this payload
    assert_eq!(auto.mask_pattern(), MaskPattern::Pattern3);
}

#[test]
fn test_version_information_blocks() {
    let version = Version::new(7).unwrap();
    let qr = QrEncoder::encode("version seven", ECLevel::L, Some(version)).unwrap();
    let size = qr.size();
    assert_eq!(size, 45);

    // Read the top-right block back, bit 0 at (size-11, 0)
    let mut bits = 0u32;
    for i in (0..18).rev() {
        bits = (bits << 1) | qr.is_dark(size - 11 + i % 3, i / 3) as u32;
    }
    assert_eq!(bits, VersionInfo::bits(version));
    assert_eq!(bits >> 12, 7);
}
