//! Fixed lookup data from the QR Code standard (Model 2, versions 1-40)

use crate::encoder::modes::Mode;
use crate::models::{ECLevel, Version};

/// Block structure for one (version, EC level) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    pub num_blocks: usize,
    pub ecc_per_block: usize,
    /// Total codewords (data + EC) in the symbol
    pub total_codewords: usize,
}

impl EcBlockInfo {
    /// Data codewords across all blocks
    pub fn data_codewords(&self) -> usize {
        self.total_codewords - self.num_blocks * self.ecc_per_block
    }

    /// Blocks that carry one data codeword fewer than the rest
    pub fn num_short_blocks(&self) -> usize {
        self.num_blocks - self.total_codewords % self.num_blocks
    }

    /// Data codewords in a short block
    pub fn short_block_data_len(&self) -> usize {
        self.total_codewords / self.num_blocks - self.ecc_per_block
    }
}

// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

// Total codewords per version (raw data modules / 8). Index: [version - 1]
const TOTAL_CODEWORDS: [u16; 40] = [
    26, 44, 70, 100, 134, 172, 196, 242, 292, 346, 404, 466, 532, 581, 655, 733, 815, 901, 991,
    1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, 2323, 2465, 2611, 2761,
    2876, 3034, 3196, 3362, 3532, 3706,
];

// Maximum input characters. Index: [version - 1][ec_level][mode] with
// modes ordered numeric, alphanumeric, byte.
#[rustfmt::skip]
const CHARACTER_CAPACITY: [[[u16; 3]; 4]; 40] = [
    [[41, 25, 17], [34, 20, 14], [27, 16, 11], [17, 10, 7]], // 1
    [[77, 47, 32], [63, 38, 26], [48, 29, 20], [34, 20, 14]], // 2
    [[127, 77, 53], [101, 61, 42], [77, 47, 32], [58, 35, 24]], // 3
    [[187, 114, 78], [149, 90, 62], [111, 67, 46], [82, 50, 34]], // 4
    [[255, 154, 106], [202, 122, 84], [144, 87, 60], [106, 64, 44]], // 5
    [[322, 195, 134], [255, 154, 106], [178, 108, 74], [139, 84, 58]], // 6
    [[370, 224, 154], [293, 178, 122], [207, 125, 86], [154, 93, 64]], // 7
    [[461, 279, 192], [365, 221, 152], [259, 157, 108], [202, 122, 84]], // 8
    [[552, 335, 230], [432, 262, 180], [312, 189, 130], [235, 143, 98]], // 9
    [[652, 395, 271], [513, 311, 213], [364, 221, 151], [288, 174, 119]], // 10
    [[772, 468, 321], [604, 366, 251], [427, 259, 177], [331, 200, 137]], // 11
    [[883, 535, 367], [691, 419, 287], [489, 296, 203], [374, 227, 155]], // 12
    [[1022, 619, 425], [796, 483, 331], [580, 352, 241], [427, 259, 177]], // 13
    [[1101, 667, 458], [871, 528, 362], [621, 376, 258], [468, 283, 194]], // 14
    [[1250, 758, 520], [991, 600, 412], [703, 426, 292], [530, 321, 220]], // 15
    [[1408, 854, 586], [1082, 656, 450], [775, 470, 322], [602, 365, 250]], // 16
    [[1548, 938, 644], [1212, 734, 504], [876, 531, 364], [674, 408, 280]], // 17
    [[1725, 1046, 718], [1346, 816, 560], [948, 574, 394], [746, 452, 310]], // 18
    [[1903, 1153, 792], [1500, 909, 624], [1063, 644, 442], [813, 493, 338]], // 19
    [[2061, 1249, 858], [1600, 970, 666], [1159, 702, 482], [919, 557, 382]], // 20
    [[2232, 1352, 929], [1708, 1035, 711], [1224, 742, 509], [969, 587, 403]], // 21
    [[2409, 1460, 1003], [1872, 1134, 779], [1358, 823, 565], [1056, 640, 439]], // 22
    [[2620, 1588, 1091], [2059, 1248, 857], [1468, 890, 611], [1108, 672, 461]], // 23
    [[2812, 1704, 1171], [2188, 1326, 911], [1588, 963, 661], [1228, 744, 511]], // 24
    [[3057, 1853, 1273], [2395, 1451, 997], [1718, 1041, 715], [1286, 779, 535]], // 25
    [[3283, 1990, 1367], [2544, 1542, 1059], [1804, 1094, 751], [1425, 864, 593]], // 26
    [[3517, 2132, 1465], [2701, 1637, 1125], [1933, 1172, 805], [1501, 910, 625]], // 27
    [[3669, 2223, 1528], [2857, 1732, 1190], [2085, 1263, 868], [1581, 958, 658]], // 28
    [[3909, 2369, 1628], [3035, 1839, 1264], [2181, 1322, 908], [1677, 1016, 698]], // 29
    [[4158, 2520, 1732], [3289, 1994, 1370], [2358, 1429, 982], [1782, 1080, 742]], // 30
    [[4417, 2677, 1840], [3486, 2113, 1452], [2473, 1499, 1030], [1897, 1150, 790]], // 31
    [[4686, 2840, 1952], [3693, 2238, 1538], [2670, 1618, 1112], [2022, 1226, 842]], // 32
    [[4965, 3009, 2068], [3909, 2369, 1628], [2805, 1700, 1168], [2157, 1307, 898]], // 33
    [[5253, 3183, 2188], [4134, 2506, 1722], [2949, 1787, 1228], [2301, 1394, 958]], // 34
    [[5529, 3351, 2303], [4343, 2632, 1809], [3081, 1867, 1283], [2361, 1431, 983]], // 35
    [[5836, 3537, 2431], [4588, 2780, 1911], [3244, 1966, 1351], [2524, 1530, 1051]], // 36
    [[6153, 3729, 2563], [4775, 2894, 1989], [3417, 2071, 1423], [2625, 1591, 1093]], // 37
    [[6479, 3927, 2699], [5039, 3054, 2099], [3599, 2181, 1499], [2735, 1658, 1139]], // 38
    [[6743, 4087, 2809], [5313, 3220, 2213], [3791, 2298, 1579], [2927, 1774, 1219]], // 39
    [[7089, 4296, 2953], [5596, 3391, 2331], [3993, 2420, 1663], [3057, 1852, 1273]], // 40
];

/// Block structure for a version and EC level
pub fn ec_block_info(version: Version, ec_level: ECLevel) -> EcBlockInfo {
    let v = version.number() as usize;
    let idx = ec_level.index();
    EcBlockInfo {
        num_blocks: NUM_ERROR_CORRECTION_BLOCKS[idx][v] as usize,
        ecc_per_block: ECC_CODEWORDS_PER_BLOCK[idx][v] as usize,
        total_codewords: total_codewords(version),
    }
}

/// Total codewords (data + EC) for a version
pub fn total_codewords(version: Version) -> usize {
    TOTAL_CODEWORDS[version.index()] as usize
}

/// Data codewords for a version and EC level
pub fn data_codewords(version: Version, ec_level: ECLevel) -> usize {
    ec_block_info(version, ec_level).data_codewords()
}

/// Largest number of input characters (bytes in byte mode) that fit
pub fn max_characters(version: Version, ec_level: ECLevel, mode: Mode) -> usize {
    CHARACTER_CAPACITY[version.index()][ec_level.index()][mode.index()] as usize
}

/// Bits left over after the last full codeword in the data region
pub fn remainder_bits(version: Version) -> usize {
    match version.number() {
        2..=6 => 7,
        14..=20 | 28..=34 => 3,
        21..=27 => 4,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::function_mask::FunctionMask;

    #[test]
    fn test_known_capacities() {
        let v1 = Version::MIN;
        assert_eq!(max_characters(v1, ECLevel::L, Mode::Numeric), 41);
        assert_eq!(max_characters(v1, ECLevel::L, Mode::Alphanumeric), 25);
        assert_eq!(max_characters(v1, ECLevel::L, Mode::Byte), 17);
        assert_eq!(max_characters(v1, ECLevel::H, Mode::Byte), 7);

        let v40 = Version::MAX;
        assert_eq!(max_characters(v40, ECLevel::L, Mode::Numeric), 7089);
        assert_eq!(max_characters(v40, ECLevel::L, Mode::Alphanumeric), 4296);
        assert_eq!(max_characters(v40, ECLevel::L, Mode::Byte), 2953);
        assert_eq!(max_characters(v40, ECLevel::H, Mode::Byte), 1273);
    }

    #[test]
    fn test_block_structure() {
        let info = ec_block_info(Version::new(5).unwrap(), ECLevel::Q);
        assert_eq!(info.num_blocks, 4);
        assert_eq!(info.ecc_per_block, 18);
        assert_eq!(info.data_codewords(), 62);
        assert_eq!(info.num_short_blocks(), 2);
        assert_eq!(info.short_block_data_len(), 15);

        assert_eq!(data_codewords(Version::MIN, ECLevel::M), 16);
        assert_eq!(data_codewords(Version::MAX, ECLevel::L), 2956);
    }

    #[test]
    fn test_total_codewords_match_module_layout() {
        // Every non-reserved module carries one codeword bit or one remainder bit
        for version in Version::all() {
            let data_modules = FunctionMask::new(version).data_modules_count();
            assert_eq!(
                data_modules,
                total_codewords(version) * 8 + remainder_bits(version),
                "version {}",
                version
            );
        }
    }

    #[test]
    fn test_character_capacity_matches_bit_budget() {
        // Each entry is the largest count whose encoded length fits the data codewords
        for version in Version::all() {
            for ec_level in ECLevel::ALL {
                let budget = data_codewords(version, ec_level) * 8;
                for mode in Mode::ALL {
                    let max = max_characters(version, ec_level, mode);
                    let fits = |n: usize| mode.encoded_bit_length(n, version) <= budget;
                    assert!(fits(max), "v{} {:?} {:?}", version, ec_level, mode);
                    assert!(!fits(max + 1), "v{} {:?} {:?}", version, ec_level, mode);
                }
            }
        }
    }

    #[test]
    fn test_capacity_strictly_increases_with_version() {
        for ec_level in ECLevel::ALL {
            for mode in Mode::ALL {
                let caps: Vec<usize> = Version::all()
                    .map(|v| max_characters(v, ec_level, mode))
                    .collect();
                assert!(caps.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
