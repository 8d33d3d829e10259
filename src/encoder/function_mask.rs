use crate::models::{BitMatrix, Version};

/// Function module mask for a specific QR version.
/// true = function module (finder, separator, timing, alignment, format,
/// version or dark module), false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
}

impl FunctionMask {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut mask = BitMatrix::new(size);

        // Finder patterns + separators (8x8 areas at the three corners)
        mask.fill_rect(0, 0, 8, 8, true);
        mask.fill_rect(size - 8, 0, 8, 8, true);
        mask.fill_rect(0, size - 8, 8, 8, true);

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        for (cx, cy) in alignment_pattern_centers(version) {
            mask.fill_rect(cx - 2, cy - 2, 5, 5, true);
        }

        // Format info areas
        for i in 0..9 {
            mask.set(8, i, true);
            mask.set(i, 8, true);
        }
        for i in 0..8 {
            mask.set(size - 1 - i, 8, true);
            mask.set(8, size - 1 - i, true);
        }

        // Dark module (covered by the format strip above, kept explicit)
        mask.set(8, size - 8, true);

        if version.has_version_info() {
            mask.fill_rect(size - 11, 0, 3, 6, true);
            mask.fill_rect(0, size - 11, 6, 3, true);
        }

        Self { mask }
    }

    pub fn size(&self) -> usize {
        self.mask.size()
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    pub fn data_modules_count(&self) -> usize {
        let size = self.size();
        size * size - self.mask.count_dark()
    }
}

/// Alignment pattern center coordinates for a given version.
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let version = version.number() as usize;
    if version == 1 {
        return Vec::new();
    }
    let num_align = version / 7 + 2;
    let size = 17 + 4 * version;
    let step = if version == 32 {
        26
    } else {
        let numerator = version * 4 + num_align * 2 + 1;
        let denom = num_align * 2 - 2;
        numerator / denom * 2
    };

    let mut positions = vec![0usize; num_align];
    positions[0] = 6;
    let mut pos = size - 7;
    for i in (1..num_align).rev() {
        positions[i] = pos;
        pos = pos.saturating_sub(step);
    }
    positions
}

/// Every (x, y) alignment center that does not collide with a finder pattern
pub fn alignment_pattern_centers(version: Version) -> Vec<(usize, usize)> {
    let positions = alignment_pattern_positions(version);
    let last = positions.len().saturating_sub(1);
    let mut centers = Vec::with_capacity(positions.len() * positions.len());
    for (i, &cy) in positions.iter().enumerate() {
        for (j, &cx) in positions.iter().enumerate() {
            let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !corner {
                centers.push((cx, cy));
            }
        }
    }
    centers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_pattern_positions(v(1)).is_empty());
        assert_eq!(alignment_pattern_positions(v(2)), vec![6, 18]);
        assert_eq!(alignment_pattern_positions(v(7)), vec![6, 22, 38]);
        assert_eq!(alignment_pattern_positions(v(32)), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(
            alignment_pattern_positions(v(40)),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_alignment_centers_skip_finders() {
        assert!(alignment_pattern_centers(v(1)).is_empty());
        assert_eq!(alignment_pattern_centers(v(2)), vec![(18, 18)]);
        assert_eq!(alignment_pattern_centers(v(7)).len(), 6);
        assert_eq!(alignment_pattern_centers(v(40)).len(), 46);
    }

    #[test]
    fn test_version1_data_modules() {
        let mask = FunctionMask::new(Version::MIN);
        assert_eq!(mask.size(), 21);
        assert_eq!(mask.data_modules_count(), 208);
        assert!(mask.is_function(0, 0));
        assert!(mask.is_function(7, 7));
        assert!(mask.is_function(8, 13));
        assert!(mask.is_function(6, 10));
        assert!(!mask.is_function(9, 9));
        assert!(!mask.is_function(20, 20));
    }

    #[test]
    fn test_version_info_regions_reserved() {
        let mask = FunctionMask::new(v(7));
        let size = mask.size();
        assert!(mask.is_function(size - 11, 0));
        assert!(mask.is_function(size - 9, 5));
        assert!(mask.is_function(5, size - 9));
        assert!(!mask.is_function(size - 12, 0));

        let no_info = FunctionMask::new(v(6));
        let size = no_info.size();
        assert!(!no_info.is_function(size - 11, 0));
    }
}
