/// Module placement: function patterns and the zigzag data walk
use crate::encoder::function_mask::{FunctionMask, alignment_pattern_centers};
use crate::encoder::version::VersionInfo;
use crate::models::{BitMatrix, Version};

/// Build the unmasked matrix for `version` holding the interleaved `codewords`.
///
/// Format information is reserved but left light; it is written once the
/// mask is known.
pub fn build_matrix(version: Version, codewords: &[u8]) -> (BitMatrix, FunctionMask) {
    let function = FunctionMask::new(version);
    let mut matrix = BitMatrix::new(version.size());
    draw_function_patterns(version, &mut matrix);
    draw_codewords(&mut matrix, &function, codewords);
    (matrix, function)
}

/// Timing strips, finders with separators, alignment patterns and version info
pub fn draw_function_patterns(version: Version, matrix: &mut BitMatrix) {
    let size = matrix.size();

    for i in 0..size {
        let dark = i % 2 == 0;
        matrix.set(6, i, dark);
        matrix.set(i, 6, dark);
    }

    draw_finder(matrix, 3, 3);
    draw_finder(matrix, size - 4, 3);
    draw_finder(matrix, 3, size - 4);

    for (cx, cy) in alignment_pattern_centers(version) {
        draw_alignment(matrix, cx, cy);
    }

    VersionInfo::draw(version, matrix);
}

/// 7x7 finder centred on (cx, cy) plus its light separator ring
fn draw_finder(matrix: &mut BitMatrix, cx: usize, cy: usize) {
    for dy in -4isize..=4 {
        for dx in -4isize..=4 {
            let x = cx as isize + dx;
            let y = cy as isize + dy;
            if x < 0 || y < 0 {
                continue;
            }
            let ring = dx.abs().max(dy.abs());
            matrix.set(x as usize, y as usize, ring != 2 && ring != 4);
        }
    }
}

fn draw_alignment(matrix: &mut BitMatrix, cx: usize, cy: usize) {
    for dy in 0..5usize {
        for dx in 0..5usize {
            let ring = dx.abs_diff(2).max(dy.abs_diff(2));
            matrix.set(cx - 2 + dx, cy - 2 + dy, ring != 1);
        }
    }
}

/// Place codeword bits MSB first along the two-column zigzag.
///
/// Columns are walked right to left in pairs, skipping the vertical timing
/// column, alternating upward and downward. Modules left over after the last
/// codeword are the remainder bits and stay light.
pub fn draw_codewords(matrix: &mut BitMatrix, function: &FunctionMask, codewords: &[u8]) {
    let size = matrix.size();
    let total_bits = codewords.len() * 8;
    let mut bit_index = 0;

    let mut right = size - 1;
    loop {
        if right == 6 {
            right = 5;
        }
        let upward = (right + 1) & 2 == 0;
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for x in [right, right - 1] {
                if function.is_function(x, y) || bit_index >= total_bits {
                    continue;
                }
                let byte = codewords[bit_index >> 3];
                let dark = (byte >> (7 - (bit_index & 7))) & 1 == 1;
                matrix.set(x, y, dark);
                bit_index += 1;
            }
        }
        if right < 2 {
            break;
        }
        right -= 2;
    }
    debug_assert_eq!(bit_index, total_bits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_finder_pattern_shape() {
        let mut matrix = BitMatrix::new(21);
        draw_function_patterns(Version::MIN, &mut matrix);
        let row0: Vec<bool> = (0..8).map(|x| matrix.get(x, 0)).collect();
        assert_eq!(
            row0,
            vec![true, true, true, true, true, true, true, false]
        );
        let row2: Vec<bool> = (0..8).map(|x| matrix.get(x, 2)).collect();
        assert_eq!(
            row2,
            vec![true, false, true, true, true, false, true, false]
        );
        // Separator row under the top-left finder
        assert!((0..8).all(|x| !matrix.get(x, 7)));
        // Top-right and bottom-left finders mirror the top-left one
        for i in 0..7 {
            for j in 0..7 {
                assert_eq!(matrix.get(i, j), matrix.get(20 - i, j));
                assert_eq!(matrix.get(i, j), matrix.get(i, 20 - j));
            }
        }
    }

    #[test]
    fn test_timing_patterns_alternate() {
        let mut matrix = BitMatrix::new(v(3).size());
        draw_function_patterns(v(3), &mut matrix);
        let size = matrix.size();
        for i in 8..size - 8 {
            assert_eq!(matrix.get(i, 6), i % 2 == 0);
            assert_eq!(matrix.get(6, i), i % 2 == 0);
        }
    }

    #[test]
    fn test_alignment_pattern_drawn() {
        let mut matrix = BitMatrix::new(v(2).size());
        draw_function_patterns(v(2), &mut matrix);
        assert!(matrix.get(18, 18));
        assert!(!matrix.get(17, 18));
        assert!(!matrix.get(19, 17));
        assert!(matrix.get(16, 16));
        assert!(matrix.get(20, 18));
    }

    #[test]
    fn test_codeword_walk_starts_bottom_right() {
        let version = Version::MIN;
        let function = FunctionMask::new(version);
        let mut matrix = BitMatrix::new(version.size());
        let mut codewords = vec![0u8; tables::total_codewords(version)];
        codewords[0] = 0b1010_0000;
        draw_codewords(&mut matrix, &function, &codewords);
        // First bits fill (20,20), (19,20), (20,19), (19,19)
        assert!(matrix.get(20, 20));
        assert!(!matrix.get(19, 20));
        assert!(matrix.get(20, 19));
        assert!(!matrix.get(19, 19));
    }

    #[test]
    fn test_every_data_module_written_once() {
        for version in [v(1), v(2), v(7), v(14), v(21)] {
            let function = FunctionMask::new(version);
            let mut matrix = BitMatrix::new(version.size());
            let codewords = vec![0xFF; tables::total_codewords(version)];
            draw_codewords(&mut matrix, &function, &codewords);
            assert_eq!(
                matrix.count_dark(),
                function.data_modules_count() - tables::remainder_bits(version)
            );
        }
    }
}
